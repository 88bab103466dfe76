use crate::{
    render::{HEIGHT, WIDTH},
    util::Color,
};
use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size},
};
use itertools::Itertools;
use std::convert::Infallible;

const PIXEL_COUNT: usize = WIDTH * HEIGHT;

/// One fully composed panel image. Row-major, no alpha. Anything drawn outside
/// the panel through the [DrawTarget] impl is clipped; text halos and glow
/// rings routinely hang off the edge.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    pixels: [Color; PIXEL_COUNT],
}

impl Frame {
    /// An all-black frame
    pub fn new() -> Self {
        Self {
            pixels: [Color::BLACK; PIXEL_COUNT],
        }
    }

    /// Get a pixel. Panics if the coordinate is off the panel
    pub fn get(&self, x: usize, y: usize) -> Color {
        assert!(x < WIDTH && y < HEIGHT, "({x}, {y}) is off the panel");
        self.pixels[y * WIDTH + x]
    }

    /// Overwrite a pixel. Panics if the coordinate is off the panel
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        assert!(x < WIDTH && y < HEIGHT, "({x}, {y}) is off the panel");
        self.pixels[y * WIDTH + x] = color;
    }

    /// Composite one color over a pixel. Off-panel points are dropped.
    pub fn blend_pixel(&mut self, point: Point, color: Color, alpha: u8) {
        if let Some(index) = index(point) {
            let pixel = &mut self.pixels[index];
            *pixel = pixel.blend(color, alpha);
        }
    }

    /// Additively composite another frame onto this one
    pub fn add(&mut self, overlay: &Frame) {
        for (pixel, other) in self.pixels.iter_mut().zip(&overlay.pixels) {
            *pixel = pixel.saturating_add(*other);
        }
    }

    /// Redraw the whole frame over black at reduced opacity
    pub fn scale(&mut self, alpha: u8) {
        for pixel in &mut self.pixels {
            *pixel = pixel.scale(alpha);
        }
    }

    /// Every pixel as `(x, y, color)`, top-left to bottom-right, row by row
    pub fn pixels(&self) -> impl '_ + Iterator<Item = (usize, usize, Color)> {
        (0..HEIGHT)
            .cartesian_product(0..WIDTH)
            .map(|(y, x)| (x, y, self.pixels[y * WIDTH + x]))
    }

    /// Get a draw target that alpha-blends everything drawn through it
    pub fn translucent(&mut self, alpha: u8) -> Translucent<'_> {
        Translucent { frame: self, alpha }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Frame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(index) = index(point) {
                self.pixels[index] = color.into();
            }
        }
        Ok(())
    }
}

/// A [Frame] borrowed with a fixed opacity
pub struct Translucent<'a> {
    frame: &'a mut Frame,
    alpha: u8,
}

impl OriginDimensions for Translucent<'_> {
    fn size(&self) -> Size {
        self.frame.size()
    }
}

impl DrawTarget for Translucent<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.frame.blend_pixel(point, color.into(), self.alpha);
        }
        Ok(())
    }
}

/// Buffer index for a point, if it's on the panel
fn index(point: Point) -> Option<usize> {
    let x = usize::try_from(point.x).ok().filter(|x| *x < WIDTH)?;
    let y = usize::try_from(point.y).ok().filter(|y| *y < HEIGHT)?;
    Some(y * WIDTH + x)
}
