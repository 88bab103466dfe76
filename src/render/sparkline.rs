//! The 24-hour temperature trend

use crate::{forecast::HOURS, ramp::ColorRamp, render::Frame, util::Color};
use embedded_graphics::prelude::Point;
use itertools::{Itertools, MinMaxResult};
use std::iter;

/// Opacity of the trail under each point
const FILL_ALPHA: u8 = 64;
/// Opacity of the point itself
const POINT_ALPHA: u8 = 230;
/// Size of the outermost glow ring around the current hour
const GLOW_START: f32 = 4.0;
/// Each ring is this fraction of the size of the previous one
const GLOW_SHRINK: f32 = 0.6;
/// Rings smaller than this aren't drawn
const GLOW_MIN: f32 = 1.0;
/// Opacity added per ring, going inward
const GLOW_ALPHA_STEP: u8 = 48;

/// Where the sparkline goes on the panel. Points are spread over
/// `[x0, x0 + span_width)` and the vertical range `[y_top, y_bottom]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sparkline {
    pub x0: i32,
    pub span_width: i32,
    pub y_top: i32,
    pub y_bottom: i32,
}

/// One sample, mapped to the panel
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SparkPoint {
    /// Hours ahead of now
    pub index: usize,
    pub position: Point,
    pub color: Color,
}

/// One stroke of the glow around the current hour: a diamond outline with
/// the given Manhattan radius
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlowRing {
    pub radius: i32,
    pub alpha: u8,
}

impl Sparkline {
    /// Lowest and highest sample
    pub fn range(samples: &[i32; HOURS]) -> (i32, i32) {
        match samples.iter().minmax() {
            MinMaxResult::MinMax(min, max) => (*min, *max),
            MinMaxResult::OneElement(value) => (*value, *value),
            MinMaxResult::NoElements => (0, 0),
        }
    }

    /// Horizontal distance between samples
    fn step(&self) -> i32 {
        self.span_width / HOURS as i32
    }

    /// Map every sample to a point. Higher temperatures are higher on the
    /// panel; the coldest sample sits on `y_bottom` and the warmest on
    /// `y_top`. A flat forecast sits halfway between.
    pub fn points<'a>(
        &'a self,
        samples: &'a [i32; HOURS],
        ramp: &'a ColorRamp,
    ) -> impl 'a + Iterator<Item = SparkPoint> {
        let (min, max) = Self::range(samples);
        let height = self.y_bottom - self.y_top;
        samples.iter().enumerate().map(move |(index, &sample)| {
            let x = self.x0 + index as i32 * self.step();
            let y = self.y_bottom - normalize(sample, min, max, 0, height);
            SparkPoint {
                index,
                position: Point::new(x, y),
                color: ramp.color_for(sample),
            }
        })
    }

    /// Rings for the current-hour glow, outermost first. Each ring is smaller
    /// and more opaque than the last.
    pub fn glow() -> impl Iterator<Item = GlowRing> {
        iter::successors(Some(GLOW_START), |size| Some(size * GLOW_SHRINK))
            .take_while(|size| *size >= GLOW_MIN)
            .enumerate()
            .map(|(i, size)| GlowRing {
                radius: size.round() as i32,
                alpha: GLOW_ALPHA_STEP.saturating_mul(i as u8 + 1),
            })
    }

    pub fn draw(
        &self,
        frame: &mut Frame,
        samples: &[i32; HOURS],
        ramp: &ColorRamp,
    ) {
        let points: Vec<SparkPoint> = self.points(samples, ramp).collect();

        // Trails first, so neighboring points are never covered
        for point in &points {
            let Point { x, y } = point.position;
            for trail_y in y + 1..=self.y_bottom {
                let trail = Point::new(x, trail_y);
                frame.blend_pixel(trail, point.color, FILL_ALPHA);
            }
        }

        if let Some(now) = points.first() {
            for ring in Self::glow() {
                for offset in diamond(ring.radius) {
                    let position = now.position + offset;
                    frame.blend_pixel(position, now.color, ring.alpha);
                }
            }
        }

        for point in &points {
            frame.blend_pixel(point.position, point.color, POINT_ALPHA);
        }
    }
}

/// Affine map from `[in_min, in_max]` to `[out_min, out_max]`, truncating.
/// An empty input range maps everything to the middle of the output range.
fn normalize(
    value: i32,
    in_min: i32,
    in_max: i32,
    out_min: i32,
    out_max: i32,
) -> i32 {
    if in_min == in_max {
        return out_min + (out_max - out_min) / 2;
    }
    // Widen so extreme inputs can't overflow the multiply
    let scaled = (value as i64 - in_min as i64)
        * (out_max as i64 - out_min as i64)
        / (in_max as i64 - in_min as i64);
    (scaled + out_min as i64) as i32
}

/// Offsets on the outline of a diamond with the given Manhattan radius
fn diamond(radius: i32) -> impl Iterator<Item = Point> {
    (-radius..=radius)
        .cartesian_product(-radius..=radius)
        .filter(move |(dx, dy)| dx.abs() + dy.abs() == radius)
        .map(|(dx, dy)| Point::new(dx, dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPARKLINE: Sparkline = Sparkline {
        x0: 16,
        span_width: 48,
        y_top: 18,
        y_bottom: 31,
    };

    #[test]
    fn test_range() {
        // Ascending, then wrapping back around
        let samples: [i32; HOURS] =
            std::array::from_fn(|i| 60 + 5 * (i as i32 % 12));
        assert_eq!(Sparkline::range(&samples), (60, 115));

        let mut samples = [50; HOURS];
        samples[17] = -3;
        samples[4] = 90;
        assert_eq!(Sparkline::range(&samples), (-3, 90));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(60, 60, 115, 0, 13), 0);
        assert_eq!(normalize(115, 60, 115, 0, 13), 13);
        // 20 * 13 / 55 = 4.7, truncated
        assert_eq!(normalize(80, 60, 115, 0, 13), 4);
        assert_eq!(normalize(70, 70, 70, 0, 13), 6);
        assert_eq!(normalize(i32::MAX, i32::MIN, i32::MAX, 0, 13), 13);
    }

    #[test]
    fn test_points() {
        let ramp = ColorRamp::default();
        let samples: [i32; HOURS] =
            std::array::from_fn(|i| 60 + 5 * (i as i32 % 12));
        let points: Vec<_> = SPARKLINE.points(&samples, &ramp).collect();

        assert_eq!(points.len(), HOURS);
        assert_eq!(
            points[0],
            SparkPoint {
                index: 0,
                position: Point::new(16, 31),
                color: ramp.color_for(60),
            }
        );
        assert_eq!(points[11].position, Point::new(38, 18));
        assert_eq!(points[23].position, Point::new(62, 18));
        assert!(points.iter().all(|point| {
            (16..64).contains(&point.position.x)
                && (18..=31).contains(&point.position.y)
        }));
    }

    #[test]
    fn test_flat_series() {
        let ramp = ColorRamp::default();
        let samples = [69; HOURS];
        let points: Vec<_> = SPARKLINE.points(&samples, &ramp).collect();
        assert!(points.iter().all(|point| point.position.y == 25));

        let mut frame = Frame::new();
        SPARKLINE.draw(&mut frame, &samples, &ramp);
        let color = Color::BLACK.blend(ramp.color_for(69), POINT_ALPHA);
        for point in &points[3..] {
            let x = point.position.x as usize;
            assert_eq!(frame.get(x, 25), color);
            assert_eq!(frame.get(x, 24), Color::BLACK);
            assert_eq!(
                frame.get(x, 26),
                Color::BLACK.blend(ramp.color_for(69), FILL_ALPHA)
            );
        }
    }

    #[test]
    fn test_zeroed_forecast() {
        let mut frame = Frame::new();
        SPARKLINE.draw(&mut frame, &[0; HOURS], &ColorRamp::default());
        assert_ne!(frame, Frame::new());
    }

    #[test]
    fn test_glow() {
        let rings: Vec<_> = Sparkline::glow().collect();
        assert_eq!(
            rings,
            vec![
                GlowRing {
                    radius: 4,
                    alpha: 48
                },
                GlowRing {
                    radius: 2,
                    alpha: 96
                },
                GlowRing {
                    radius: 1,
                    alpha: 144
                },
            ]
        );
    }

    #[test]
    fn test_diamond() {
        assert_eq!(diamond(0).collect::<Vec<_>>(), vec![Point::zero()]);
        let ring: Vec<_> = diamond(2).collect();
        assert_eq!(ring.len(), 8);
        assert!(ring.contains(&Point::new(-2, 0)));
        assert!(ring.contains(&Point::new(1, -1)));
    }
}
