use crate::{
    output::OutputConfig, ramp::ColorRamp, render::LayerConfig, util::Color,
};
use anyhow::Context;
use log::info;
use serde::Deserialize;
use std::{fs::File, path::Path, time::Duration};

#[derive(Debug, Deserialize)]
pub struct Config {
    /// NWS forecast office, e.g. `BOX`
    pub forecast_office: String,
    /// Grid X/Y within the forecast office
    pub forecast_gridpoint: (u32, u32),
    #[serde(default = "default_forecast_ttl_secs")]
    pub forecast_ttl_secs: u64,
    #[serde(default)]
    pub output: OutputConfig,
    /// BCM number of the GPIO pin wired to the dim button
    #[serde(default)]
    pub button_pin: Option<u64>,
    /// Override for the temperature color ramp
    #[serde(default)]
    pub color_ramp: Option<Vec<Color>>,
    #[serde(default)]
    pub layers: LayerConfig,
}

impl Config {
    pub const DEFAULT_PATH: &'static str = "./config.json";

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        info!("Loading config from `{}`", path.display());
        let file = File::open(path).with_context(|| {
            format!("Error opening config file {}", path.display())
        })?;
        serde_json::from_reader(file).with_context(|| {
            format!("Error parsing config file {}", path.display())
        })
    }

    pub fn forecast_ttl(&self) -> Duration {
        Duration::from_secs(self.forecast_ttl_secs)
    }

    /// Build the color ramp, falling back to the built-in one
    pub fn color_ramp(&self) -> anyhow::Result<ColorRamp> {
        match &self.color_ramp {
            Some(colors) => ColorRamp::try_from(colors.clone())
                .context("Invalid `color_ramp` in config"),
            None => Ok(ColorRamp::default()),
        }
    }
}

fn default_forecast_ttl_secs() -> u64 {
    60
}
