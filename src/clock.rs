use chrono::{DateTime, Local, TimeZone, Timelike};

/// Everything the display needs to know about the current time, already
/// formatted. Built once per tick.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WallClock {
    /// Hour and minute, e.g. `9:41`
    pub time: String,
    /// `AM` or `PM`
    pub meridiem: String,
    /// Month and day, e.g. `10/18`
    pub date: String,
    /// Always in `[0, 86400)`
    pub seconds_since_midnight: u32,
}

impl WallClock {
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    // https://docs.rs/chrono/latest/chrono/format/strftime/index.html
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            time: datetime.format("%-I:%M").to_string(),
            meridiem: datetime.format("%p").to_string(),
            date: datetime.format("%-m/%-d").to_string(),
            seconds_since_midnight: datetime.num_seconds_from_midnight(),
        }
    }

    pub fn seconds_into_minute(&self) -> u32 {
        self.seconds_since_midnight % 60
    }
}
