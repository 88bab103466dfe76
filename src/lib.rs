//! Weather clock for a 64x32 RGB LED matrix. Each frame is composed from the
//! wall clock, the latest hourly forecast, and a couple of user toggles, then
//! pushed to the panel (or a preview, when not on a Pi).

pub mod clock;
pub mod config;
pub mod forecast;
pub mod input;
pub mod output;
pub mod ramp;
pub mod render;
pub mod state;
pub mod util;
pub mod weather;
