//! Everything that turns state into pixels. Nothing in here touches hardware;
//! the output of this module is a [Frame], which gets handed off to a
//! [MatrixOutput](crate::output::MatrixOutput).

mod compositor;
mod frame;
mod icon;
mod sparkline;
mod text;

pub use compositor::{FrameCompositor, LayerConfig};
pub use frame::{Frame, Translucent};
pub use icon::Icon;
pub use sparkline::{GlowRing, SparkPoint, Sparkline};
pub use text::{draw_outlined, status_dot, FontSize, STATUS_DOT_SIZE};

/// Width of the panel, in pixels
pub const WIDTH: usize = 64;
/// Height of the panel, in pixels
pub const HEIGHT: usize = 32;
