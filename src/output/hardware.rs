use crate::{
    output::{MatrixOutput, OutputConfig},
    render::{HEIGHT, WIDTH},
};
use anyhow::{anyhow, ensure};
use log::{info, trace};
use rpi_led_matrix::{LedCanvas, LedColor, LedMatrix, LedMatrixOptions};

/// The real RGB panel, driven through the rpi-rgb-led-matrix library
pub struct HardwareMatrix {
    matrix: LedMatrix,
    /// Offscreen canvas being drawn. Only empty for the duration of a swap.
    canvas: Option<LedCanvas>,
}

impl HardwareMatrix {
    pub fn new(config: &OutputConfig) -> anyhow::Result<Self> {
        let width = config.cols * config.chain_length;
        let height = config.rows * config.parallel;
        ensure!(
            width as usize >= WIDTH && height as usize >= HEIGHT,
            "Panel is {width}x{height}, need at least {WIDTH}x{HEIGHT}"
        );

        let mut options = LedMatrixOptions::new();
        options.set_hardware_mapping(&config.hardware_mapping);
        options.set_rows(config.rows);
        options.set_cols(config.cols);
        options.set_chain_length(config.chain_length);
        options.set_parallel(config.parallel);
        options.set_refresh_rate(config.show_refresh_rate);

        // The error type is a bare string, so we have to map manually
        let matrix = LedMatrix::new(Some(options), None)
            .map_err(|error| anyhow!("Error initializing matrix: {error}"))?;
        let canvas = matrix.offscreen_canvas();
        info!("Matrix initialized ({width}x{height})");

        Ok(Self {
            matrix,
            canvas: Some(canvas),
        })
    }
}

impl MatrixOutput for HardwareMatrix {
    fn name(&self) -> &'static str {
        "hardware"
    }

    fn write_pixel(
        &mut self,
        x: usize,
        y: usize,
        red: u8,
        green: u8,
        blue: u8,
    ) {
        assert!(x < WIDTH && y < HEIGHT, "({x}, {y}) is off the panel");
        if let Some(canvas) = &mut self.canvas {
            canvas.set(x as i32, y as i32, &LedColor { red, green, blue });
        }
    }

    fn flip_buffer(&mut self) {
        trace!("Swapping matrix canvas");
        if let Some(canvas) = self.canvas.take() {
            // Blocks until vsync, then hands back the previous front buffer
            let mut canvas = self.matrix.swap(canvas);
            canvas.clear();
            self.canvas = Some(canvas);
        }
    }

    fn is_shim(&self) -> bool {
        false
    }
}

impl Drop for HardwareMatrix {
    fn drop(&mut self) {
        info!("Closing matrix");
        if let Some(canvas) = &mut self.canvas {
            canvas.clear();
        }
        if let Some(canvas) = self.canvas.take() {
            // Leave the panel dark rather than frozen on the last frame
            self.canvas = Some(self.matrix.swap(canvas));
        }
    }
}
