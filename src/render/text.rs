use crate::util::Color;
use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{PrimitiveStyle, Rectangle},
    Drawable,
};
use u8g2_fonts::{
    fonts,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

const SMALL_FONT: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_tom_thumb_4x6_tf>()
        .with_ignore_unknown_chars(true);
const MEDIUM_FONT: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_5x8_tf>()
        .with_ignore_unknown_chars(true);

/// Offsets for the halo, drawn before the text itself. Every neighbor,
/// diagonals included.
pub const OUTLINE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The two fonts that fit on the panel
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FontSize {
    /// 4x6, for the date
    Small,
    /// 5x8, for the time and temperature
    Medium,
}

impl FontSize {
    fn renderer(self) -> &'static FontRenderer {
        match self {
            Self::Small => &SMALL_FONT,
            Self::Medium => &MEDIUM_FONT,
        }
    }

    /// Rightmost column the text will touch (exclusive), when drawn
    /// left-aligned at `x`. Empty text has no width.
    pub fn right_edge(self, text: &str, x: i32) -> i32 {
        let origin = Point::new(x, 0);
        self.renderer()
            .get_rendered_dimensions(text, origin, VerticalPosition::Top)
            .ok()
            .and_then(|dimensions| dimensions.bounding_box)
            .map(|bounds| bounds.top_left.x + bounds.size.width as i32)
            .unwrap_or(x)
    }
}

/// Draw text with a one-pixel halo in `background`, so it stays legible over
/// anything. `position` is the top of the text; `alignment` says which end of
/// the text it anchors.
pub fn draw_outlined<D>(
    target: &mut D,
    text: &str,
    position: Point,
    alignment: HorizontalAlignment,
    size: FontSize,
    background: Color,
    foreground: Color,
) where
    D: DrawTarget<Color = Rgb888>,
{
    let passes = OUTLINE_OFFSETS
        .iter()
        .map(|&(dx, dy)| (position + Point::new(dx, dy), background))
        .chain([(position, foreground)]);
    for (position, color) in passes {
        // Unknown glyphs are skipped and the color is always transparent, so
        // the only possible error is from the target
        let _ = size.renderer().render_aligned(
            text,
            position,
            VerticalPosition::Top,
            alignment,
            FontColor::Transparent(Rgb888::from(color)),
            target,
        );
    }
}

/// Width and height of [status_dot]
pub const STATUS_DOT_SIZE: u32 = 5;

/// Small anchor glyph next to a numeral: three nested squares, dim at the
/// border and full brightness in the middle.
pub fn status_dot<D>(
    target: &mut D,
    top_left: Point,
    color: Color,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    for (inset, alpha) in [(0, 64), (1, 128), (2, 255)] {
        let side = STATUS_DOT_SIZE - 2 * inset as u32;
        let fill = Rgb888::from(color.scale(alpha));
        Rectangle::new(
            top_left + Point::new(inset, inset),
            Size::new(side, side),
        )
        .into_styled(PrimitiveStyle::with_fill(fill))
        .draw(target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Frame, HEIGHT, WIDTH};

    const RED: Color = Color::new(255, 0, 0);

    #[test]
    fn test_outline_offsets() {
        let mut offsets = OUTLINE_OFFSETS.to_vec();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets.len(), 8);
        assert!(!offsets.contains(&(0, 0)));
        assert!(offsets
            .iter()
            .all(|(dx, dy)| dx.abs() <= 1 && dy.abs() <= 1));
    }

    #[test]
    fn test_halo_surrounds_text() {
        let mut frame = Frame::new();
        draw_outlined(
            &mut frame,
            "12:34",
            Point::new(10, 10),
            HorizontalAlignment::Left,
            FontSize::Medium,
            RED,
            Color::WHITE,
        );

        let foreground: Vec<_> = frame
            .pixels()
            .filter(|(_, _, color)| *color == Color::WHITE)
            .collect();
        assert!(!foreground.is_empty());
        assert!(frame.pixels().any(|(_, _, color)| color == RED));

        // Every neighbor of a text pixel is text or halo, never bare background
        for (x, y, _) in foreground {
            for (dx, dy) in OUTLINE_OFFSETS {
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if (0..WIDTH as i32).contains(&nx)
                    && (0..HEIGHT as i32).contains(&ny)
                {
                    assert_ne!(
                        frame.get(nx as usize, ny as usize),
                        Color::BLACK,
                        "({nx}, {ny}) next to text pixel ({x}, {y})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_right_alignment() {
        let mut frame = Frame::new();
        draw_outlined(
            &mut frame,
            "9:41",
            Point::new(40, 2),
            HorizontalAlignment::Right,
            FontSize::Small,
            Color::BLACK,
            Color::WHITE,
        );
        let xs: Vec<_> = frame
            .pixels()
            .filter(|(_, _, color)| *color == Color::WHITE)
            .map(|(x, _, _)| x)
            .collect();
        assert!(!xs.is_empty());
        assert!(xs.iter().all(|x| *x <= 40));
    }

    #[test]
    fn test_right_edge() {
        assert_eq!(FontSize::Medium.right_edge("", 3), 3);
        let one = FontSize::Medium.right_edge("7", 0);
        let two = FontSize::Medium.right_edge("77", 0);
        assert!(one > 0);
        assert!(two > one);
    }

    #[test]
    fn test_status_dot() {
        let mut frame = Frame::new();
        status_dot(&mut frame, Point::new(2, 2), Color::WHITE).unwrap();
        assert_eq!(frame.get(2, 2), Color::new(64, 64, 64));
        assert_eq!(frame.get(6, 6), Color::new(64, 64, 64));
        assert_eq!(frame.get(3, 3), Color::new(128, 128, 128));
        assert_eq!(frame.get(4, 4), Color::WHITE);
        assert_eq!(frame.get(7, 4), Color::BLACK);
    }
}
