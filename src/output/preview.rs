use crate::{output::MatrixOutput, render::Frame, util::Color};
use log::{debug, info, trace};

/// Stand-in for the panel, to allow running on machines without one. Keeps
/// the same double-buffer semantics as the real thing, so what's "on screen"
/// can be inspected.
#[derive(Debug, Default)]
pub struct PreviewMatrix {
    /// Being drawn
    back: Box<Frame>,
    /// Last flipped
    front: Box<Frame>,
    flips: u64,
}

impl PreviewMatrix {
    pub fn new() -> Self {
        info!("Initializing preview matrix");
        Self::default()
    }

    /// What the panel would be showing right now
    pub fn front(&self) -> &Frame {
        &self.front
    }
}

impl MatrixOutput for PreviewMatrix {
    fn name(&self) -> &'static str {
        "preview"
    }

    fn write_pixel(
        &mut self,
        x: usize,
        y: usize,
        red: u8,
        green: u8,
        blue: u8,
    ) {
        trace!("Writing preview pixel ({x}, {y}): {red}, {green}, {blue}");
        self.back.set(x, y, Color::new(red, green, blue));
    }

    fn flip_buffer(&mut self) {
        self.flips += 1;
        debug!("Flipping preview buffer (#{})", self.flips);
        self.front = std::mem::take(&mut self.back);
    }

    fn is_shim(&self) -> bool {
        true
    }
}

impl Drop for PreviewMatrix {
    fn drop(&mut self) {
        info!("Closing preview matrix after {} frames", self.flips);
    }
}
