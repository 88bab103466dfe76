use crate::{forecast::WeatherCategory, util::Color};
use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{Pixel, Point},
};

const SIZE: usize = 12;

/// A fixed 12x12 weather icon. Each row is a string of palette characters;
/// `.` is transparent.
#[derive(Debug)]
pub struct Icon {
    rows: [&'static str; SIZE],
}

impl Icon {
    /// Width and height, in pixels
    pub const SIZE: usize = SIZE;

    /// Icon for a category. Every category has one.
    pub fn for_category(category: WeatherCategory) -> &'static Self {
        match category {
            WeatherCategory::Clear => &CLEAR,
            WeatherCategory::PartlyCloudy => &PARTLY_CLOUDY,
            WeatherCategory::Cloudy => &CLOUDY,
            WeatherCategory::Rain => &RAIN,
            WeatherCategory::Snow => &SNOW,
            WeatherCategory::Thunder => &THUNDER,
            WeatherCategory::CloudyNight => &CLOUDY_NIGHT,
            WeatherCategory::ClearNight => &CLEAR_NIGHT,
        }
    }

    /// Opaque pixels of the icon, placed with its top-left corner at `origin`
    pub fn pixels(
        &self,
        origin: Point,
    ) -> impl '_ + Iterator<Item = Pixel<Rgb888>> {
        self.rows.iter().enumerate().flat_map(move |(y, row)| {
            row.bytes().enumerate().filter_map(move |(x, code)| {
                let color = palette(code)?;
                Some(Pixel(
                    origin + Point::new(x as i32, y as i32),
                    color.into(),
                ))
            })
        })
    }
}

fn palette(code: u8) -> Option<Color> {
    let color = match code {
        b'Y' => Color::new(255, 200, 0),   // sun
        b'O' => Color::new(255, 130, 0),   // sun rim
        b'W' => Color::new(200, 200, 215), // cloud
        b'G' => Color::new(110, 110, 130), // cloud shadow
        b'D' => Color::new(70, 70, 95),    // storm cloud
        b'B' => Color::new(40, 120, 255),  // rain
        b'S' => Color::new(220, 240, 255), // snow
        b'L' => Color::new(255, 255, 90),  // lightning
        b'M' => Color::new(230, 225, 160), // moon
        _ => return None,
    };
    Some(color)
}

static CLEAR: Icon = Icon {
    rows: [
        "............",
        ".....YY.....",
        "..Y......Y..",
        "....OOOO....",
        "...OYYYYO...",
        ".Y.OYYYYO.Y.",
        ".Y.OYYYYO.Y.",
        "...OYYYYO...",
        "....OOOO....",
        "..Y......Y..",
        ".....YY.....",
        "............",
    ],
};

static CLEAR_NIGHT: Icon = Icon {
    rows: [
        "............",
        ".....MMM....",
        "...MMM......",
        "..MMM.......",
        "..MM........",
        ".MMM........",
        ".MMM........",
        "..MM........",
        "..MMM....M..",
        "...MMMMMMM..",
        ".....MMMM...",
        "............",
    ],
};

static PARTLY_CLOUDY: Icon = Icon {
    rows: [
        "............",
        "..Y.........",
        "....OOO.....",
        "Y..OYYYO....",
        "...OYYWWW...",
        "...OYWWWWW..",
        "..Y.WWWWWWW.",
        "...WWWWWWWWW",
        "..WWWWWWWWWW",
        "...GGGGGGGG.",
        "............",
        "............",
    ],
};

static CLOUDY_NIGHT: Icon = Icon {
    rows: [
        "............",
        "...MMM......",
        "..MM........",
        ".MM.........",
        ".MM..WWW....",
        ".MM.WWWWW...",
        "..MWWWWWWW..",
        "...WWWWWWWW.",
        "..WWWWWWWWWW",
        "...GGGGGGGG.",
        "............",
        "............",
    ],
};

static CLOUDY: Icon = Icon {
    rows: [
        "............",
        "............",
        "............",
        ".....WWW....",
        "....WWWWW...",
        "..WWWWWWWW..",
        ".WWWWWWWWWW.",
        "WWWWWWWWWWWW",
        "WWWWWWWWWWWW",
        ".GGGGGGGGGG.",
        "............",
        "............",
    ],
};

static RAIN: Icon = Icon {
    rows: [
        "............",
        ".....GGG....",
        "....GGGGG...",
        "..GGGGGGGG..",
        ".GGGGGGGGGG.",
        "GGGGGGGGGGGG",
        ".DDDDDDDDDD.",
        "............",
        "..B...B...B.",
        ".B...B...B..",
        "............",
        "...B...B....",
    ],
};

static SNOW: Icon = Icon {
    rows: [
        "............",
        ".....WWW....",
        "....WWWWW...",
        "..WWWWWWWW..",
        ".WWWWWWWWWW.",
        "WWWWWWWWWWWW",
        ".GGGGGGGGGG.",
        "............",
        "..S....S....",
        ".SSS..SSS.S.",
        "..S....S.SSS",
        "..........S.",
    ],
};

static THUNDER: Icon = Icon {
    rows: [
        "............",
        ".....DDD....",
        "....DDDDD...",
        "..DDDDDDDD..",
        ".DDDDDDDDDD.",
        "DDDDDDDDDDDD",
        ".GGGGLLGGGG.",
        ".....LL.....",
        "....LL......",
        "...LLLLL....",
        ".....LL.....",
        ".....L......",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_icons_are_square() {
        for &category in WeatherCategory::ALL {
            let icon = Icon::for_category(category);
            for row in icon.rows {
                assert_eq!(row.len(), Icon::SIZE, "{category:?}: `{row}`");
                assert!(
                    row.bytes().all(|code| code == b'.'
                        || palette(code).is_some()),
                    "{category:?}: unknown palette code in `{row}`"
                );
            }
        }
    }

    #[test]
    fn test_icons_are_distinct() {
        let icons: HashSet<_> = WeatherCategory::ALL
            .iter()
            .map(|&category| Icon::for_category(category).rows)
            .collect();
        assert_eq!(icons.len(), WeatherCategory::ALL.len());
    }

    #[test]
    fn test_pixels_offset() {
        let icon = Icon::for_category(WeatherCategory::Clear);
        let pixels: Vec<_> = icon.pixels(Point::new(1, 1)).collect();
        assert!(pixels.contains(&Pixel(
            Point::new(6, 2),
            Color::new(255, 200, 0).into()
        )));
        assert!(pixels.iter().all(|Pixel(point, _)| {
            (1..13).contains(&point.x) && (1..13).contains(&point.y)
        }));
    }
}
