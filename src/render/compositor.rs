//! Builds one complete frame from the clock, the forecast and the toggles.
//! Layers go down in a fixed order, each optionally disabled via
//! [LayerConfig]:
//!
//! 1. Black
//! 2. Stippled wash behind the clock, in the current temperature's color
//! 3. Time and date
//! 4. Half-black veil over everything so far, then the time again on top
//! 5. Weather icon
//! 6. Temperature sparkline
//! 7. Current temperature, with a status dot
//! 8. Seconds sweep, added rather than blended so it glows
//! 9. Global dim, if toggled on

use crate::{
    clock::WallClock,
    forecast::Forecast,
    ramp::ColorRamp,
    render::{
        draw_outlined, status_dot, FontSize, Frame, Icon, Sparkline,
        STATUS_DOT_SIZE,
    },
    state::DisplayToggles,
    util::Color,
};
use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{
        DrawTarget, OriginDimensions, Point, Primitive, RgbColor, Size,
    },
    primitives::{Line, PrimitiveStyle, Rectangle},
    Drawable,
};
use itertools::Itertools;
use log::trace;
use serde::Deserialize;
use std::convert::Infallible;
use u8g2_fonts::types::HorizontalAlignment;

/// Corner behind the clock that gets the stippled wash
const WASH_AREA: Rectangle =
    Rectangle::new(Point::new(28, 0), Size::new(36, 17));
const WASH_ALPHA: u8 = 96;
/// Right edge of the time and date. One short of the panel edge so the halo
/// fits.
const CLOCK_RIGHT: i32 = 62;
const TIME_TOP: i32 = 1;
const DATE_TOP: i32 = 11;
const DATE_COLOR: Color = Color::new(170, 170, 170);
/// Veil opacity for the depth effect
const DEPTH_DIM_ALPHA: u8 = 128;
const ICON_ORIGIN: Point = Point::new(1, 1);
/// Starts right of the widest temperature (`-100`) and its status dot, so
/// the current-hour point is never covered
const SPARKLINE: Sparkline = Sparkline {
    x0: 26,
    span_width: 38,
    y_top: 18,
    y_bottom: 31,
};
const TEMPERATURE_ORIGIN: Point = Point::new(0, 20);
/// Gap between the temperature and its status dot
const STATUS_DOT_GAP: i32 = 1;
/// The seconds sweep is centered on the icon
const SECONDS_CENTER: Point = Point::new(
    ICON_ORIGIN.x + Icon::SIZE as i32 / 2,
    ICON_ORIGIN.y + Icon::SIZE as i32 / 2,
);
const SECONDS_RADIUS: i32 = 9;
/// Brightness of the swept area
const SECONDS_ARC_ALPHA: u8 = 40;
/// Brightness of the leading edge
const SECONDS_EDGE_ALPHA: u8 = 140;
/// Final opacity when dim mode is on
const DIM_MODE_ALPHA: u8 = 77;

/// Which layers of the frame are drawn. Everything is on by default.
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct LayerConfig {
    pub wash: bool,
    pub depth_dim: bool,
    pub icon: bool,
    pub sparkline: bool,
    pub current_temperature: bool,
    pub seconds_overlay: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            wash: true,
            depth_dim: true,
            icon: true,
            sparkline: true,
            current_temperature: true,
            seconds_overlay: true,
        }
    }
}

/// Turns display state into pixels. Pure: the same inputs always produce the
/// same frame.
#[derive(Clone, Debug)]
pub struct FrameCompositor {
    ramp: ColorRamp,
    layers: LayerConfig,
}

impl FrameCompositor {
    pub fn new(ramp: ColorRamp, layers: LayerConfig) -> Self {
        Self { ramp, layers }
    }

    pub fn compose_frame(
        &self,
        now: &WallClock,
        forecast: &Forecast,
        toggles: DisplayToggles,
    ) -> Frame {
        trace!("Composing frame for {} {}", now.date, now.time);
        let mut frame = Frame::new();
        let now_color = self.ramp.color_for(forecast.now());

        if self.layers.wash {
            draw_wash(&mut frame, now_color);
        }

        draw_time(&mut frame, now);
        draw_outlined(
            &mut frame,
            &format!("{} {}", now.meridiem, now.date),
            Point::new(CLOCK_RIGHT, DATE_TOP),
            HorizontalAlignment::Right,
            FontSize::Small,
            Color::BLACK,
            DATE_COLOR,
        );

        if self.layers.depth_dim {
            infallible(
                Rectangle::new(Point::zero(), frame.size())
                    .into_styled(PrimitiveStyle::with_fill(Rgb888::BLACK))
                    .draw(&mut frame.translucent(DEPTH_DIM_ALPHA)),
            );
            // Keep the time crisp over the veil
            draw_time(&mut frame, now);
        }

        if self.layers.icon {
            let icon = Icon::for_category(forecast.category());
            infallible(frame.draw_iter(icon.pixels(ICON_ORIGIN)));
        }

        if self.layers.sparkline {
            SPARKLINE.draw(&mut frame, forecast.temperatures(), &self.ramp);
        }

        if self.layers.current_temperature {
            let text = forecast.now().to_string();
            draw_outlined(
                &mut frame,
                &text,
                TEMPERATURE_ORIGIN,
                HorizontalAlignment::Left,
                FontSize::Medium,
                Color::BLACK,
                now_color,
            );
            let right =
                FontSize::Medium.right_edge(&text, TEMPERATURE_ORIGIN.x);
            infallible(status_dot(
                &mut frame,
                Point::new(right + STATUS_DOT_GAP, TEMPERATURE_ORIGIN.y + 1),
                now_color,
            ));
        }

        if self.layers.seconds_overlay {
            frame.add(&seconds_overlay(now.seconds_into_minute()));
        }

        if toggles.dim_mode {
            frame.scale(DIM_MODE_ALPHA);
        }

        frame
    }
}

/// Checkerboard of the given color over the wash area
fn draw_wash(frame: &mut Frame, color: Color) {
    let top_left = WASH_AREA.top_left;
    let Size { width, height } = WASH_AREA.size;
    for (y, x) in (top_left.y..top_left.y + height as i32)
        .cartesian_product(top_left.x..top_left.x + width as i32)
    {
        if (x + y) % 2 == 0 {
            frame.blend_pixel(Point::new(x, y), color, WASH_ALPHA);
        }
    }
}

fn draw_time(frame: &mut Frame, now: &WallClock) {
    draw_outlined(
        frame,
        &now.time,
        Point::new(CLOCK_RIGHT, TIME_TOP),
        HorizontalAlignment::Right,
        FontSize::Medium,
        Color::BLACK,
        Color::WHITE,
    );
}

/// Draw a pie slice around the icon covering the elapsed part of the minute,
/// with a brighter hand on the leading edge. Drawn on its own black frame so
/// it can be added onto the main one.
fn seconds_overlay(seconds: u32) -> Frame {
    let mut overlay = Frame::new();
    let sweep = seconds as f32 * 6.0;

    for (dy, dx) in (-SECONDS_RADIUS..=SECONDS_RADIUS)
        .cartesian_product(-SECONDS_RADIUS..=SECONDS_RADIUS)
    {
        let inside = dx * dx + dy * dy <= SECONDS_RADIUS * SECONDS_RADIUS;
        if inside && clockwise_from_top(dx, dy) < sweep {
            overlay.blend_pixel(
                SECONDS_CENTER + Point::new(dx, dy),
                Color::WHITE,
                SECONDS_ARC_ALPHA,
            );
        }
    }

    let (sin, cos) = sweep.to_radians().sin_cos();
    let hand = Point::new(
        (SECONDS_RADIUS as f32 * sin).round() as i32,
        -(SECONDS_RADIUS as f32 * cos).round() as i32,
    );
    infallible(
        Line::new(SECONDS_CENTER, SECONDS_CENTER + hand)
            .into_styled(PrimitiveStyle::with_stroke(
                Rgb888::from(Color::WHITE.scale(SECONDS_EDGE_ALPHA)),
                1,
            ))
            .draw(&mut overlay),
    );

    overlay
}

/// Angle of an offset in degrees, clockwise from 12 o'clock, in `[0, 360)`.
/// Screen y points down.
fn clockwise_from_top(dx: i32, dy: i32) -> f32 {
    let degrees = (dx as f32).atan2(-dy as f32).to_degrees();
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
