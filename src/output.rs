//! An "output" is whatever receives finished frames: the real LED panel on
//! the Pi, or an in-memory preview everywhere else. Each implementation has a
//! submodule.

#[cfg(target_arch = "arm")]
mod hardware;
mod preview;

pub use preview::PreviewMatrix;

use crate::render::Frame;
use log::info;
use serde::Deserialize;
use std::time::Duration;

/// A double-buffered pixel sink. Pixels are written into a hidden buffer,
/// then made visible all at once by [Self::flip_buffer].
pub trait MatrixOutput {
    /// Human-readable name, for logging
    fn name(&self) -> &'static str;

    /// Set one pixel in the back buffer. Panics if the pixel is off the
    /// panel.
    fn write_pixel(
        &mut self,
        x: usize,
        y: usize,
        red: u8,
        green: u8,
        blue: u8,
    );

    /// Show the back buffer, and start the next one from black
    fn flip_buffer(&mut self);

    /// Is this a stand-in for real hardware?
    fn is_shim(&self) -> bool;

    /// Write an entire frame, then show it
    fn transmit(&mut self, frame: &Frame) {
        for (x, y, color) in frame.pixels() {
            let [red, green, blue] = color.to_bytes();
            self.write_pixel(x, y, red, green, blue);
        }
        self.flip_buffer();
    }

    /// How long to wait between frames. The preview runs faster so it's
    /// easier to watch animations in the logs.
    fn tick_interval(&self) -> Duration {
        if self.is_shim() {
            Duration::from_millis(100)
        } else {
            Duration::from_secs(1)
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    #[default]
    Preview,
    Hardware,
}

/// Panel settings. Everything but `kind` is passed straight through to the
/// matrix library, and ignored by the preview.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub kind: OutputKind,
    pub hardware_mapping: String,
    pub rows: u32,
    pub cols: u32,
    pub chain_length: u32,
    pub parallel: u32,
    pub show_refresh_rate: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            kind: OutputKind::default(),
            hardware_mapping: "adafruit-hat".into(),
            rows: 32,
            cols: 64,
            chain_length: 1,
            parallel: 1,
            show_refresh_rate: false,
        }
    }
}

/// Open the configured output
pub fn open(config: &OutputConfig) -> anyhow::Result<Box<dyn MatrixOutput>> {
    let output: Box<dyn MatrixOutput> = match config.kind {
        OutputKind::Preview => Box::new(PreviewMatrix::new()),
        OutputKind::Hardware => open_hardware(config)?,
    };
    info!("Opened {} output", output.name());
    Ok(output)
}

#[cfg(target_arch = "arm")]
fn open_hardware(
    config: &OutputConfig,
) -> anyhow::Result<Box<dyn MatrixOutput>> {
    Ok(Box::new(hardware::HardwareMatrix::new(config)?))
}

#[cfg(not(target_arch = "arm"))]
fn open_hardware(_: &OutputConfig) -> anyhow::Result<Box<dyn MatrixOutput>> {
    anyhow::bail!("Hardware output is only supported on ARM builds")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_preview() {
        let output = open(&OutputConfig::default()).unwrap();
        assert!(output.is_shim());
        assert_eq!(output.tick_interval(), Duration::from_millis(100));
    }

    #[cfg(not(target_arch = "arm"))]
    #[test]
    fn test_open_hardware_off_pi() {
        let config = OutputConfig {
            kind: OutputKind::Hardware,
            ..Default::default()
        };
        assert!(open(&config).is_err());
    }
}
