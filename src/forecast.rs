//! The forecast data the display is built from

mod category;

pub use category::WeatherCategory;

use anyhow::bail;

/// Number of hourly samples in a forecast
pub const HOURS: usize = 24;

/// 24 hours of temperatures plus the current conditions. Index 0 of
/// `temperatures` is always the current hour. Replaced wholesale when a new
/// fetch lands; never edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Forecast {
    temperatures: [i32; HOURS],
    short_forecast: String,
    is_daytime: bool,
    /// Classified once, here, so the render loop never has to
    category: WeatherCategory,
}

impl Forecast {
    pub fn new(
        temperatures: [i32; HOURS],
        short_forecast: impl Into<String>,
        is_daytime: bool,
    ) -> Self {
        let short_forecast = short_forecast.into();
        let category = WeatherCategory::classify(&short_forecast, is_daytime);
        Self {
            temperatures,
            short_forecast,
            is_daytime,
            category,
        }
    }

    /// Build from a list of hourly periods, the first being the current hour.
    /// Each period is `(temperature, short forecast, is daytime)`. Extra
    /// periods past 24 are ignored.
    pub fn from_periods<'a>(
        periods: impl IntoIterator<Item = (i32, &'a str, bool)>,
    ) -> anyhow::Result<Self> {
        let mut temperatures = [0; HOURS];
        let mut current = None;
        let mut count = 0;
        for (i, (temperature, short_forecast, is_daytime)) in
            periods.into_iter().take(HOURS).enumerate()
        {
            if i == 0 {
                current = Some((short_forecast, is_daytime));
            }
            temperatures[i] = temperature;
            count += 1;
        }

        match current {
            Some((short_forecast, is_daytime)) if count == HOURS => {
                Ok(Self::new(temperatures, short_forecast, is_daytime))
            }
            _ => bail!("Expected {HOURS} forecast periods, got {count}"),
        }
    }

    pub fn temperatures(&self) -> &[i32; HOURS] {
        &self.temperatures
    }

    /// Temperature for the current hour
    pub fn now(&self) -> i32 {
        self.temperatures[0]
    }

    pub fn short_forecast(&self) -> &str {
        &self.short_forecast
    }

    pub fn is_daytime(&self) -> bool {
        self.is_daytime
    }

    pub fn category(&self) -> WeatherCategory {
        self.category
    }
}

/// Stand-in before the first fetch succeeds: flat zero, unclassifiable text
impl Default for Forecast {
    fn default() -> Self {
        Self::new([0; HOURS], "", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classified_on_construction() {
        let forecast = Forecast::new([69; HOURS], "Sunny", true);
        assert_eq!(forecast.category(), WeatherCategory::Clear);
        assert_eq!(forecast.now(), 69);

        let forecast = Forecast::new([40; HOURS], "Sunny", false);
        assert_eq!(forecast.category(), WeatherCategory::ClearNight);
    }

    #[test]
    fn test_default() {
        let forecast = Forecast::default();
        assert_eq!(forecast.temperatures(), &[0; HOURS]);
        assert_eq!(forecast.category(), WeatherCategory::Cloudy);
    }

    #[test]
    fn test_from_periods() {
        let periods: Vec<(i32, &str, bool)> = (0..30)
            .map(|i| {
                let text = if i == 0 { "Light Snow" } else { "Sunny" };
                (50 + i, text, i % 2 == 0)
            })
            .collect();
        let forecast = Forecast::from_periods(periods).unwrap();
        assert_eq!(forecast.now(), 50);
        assert_eq!(forecast.temperatures()[23], 73);
        assert_eq!(forecast.short_forecast(), "Light Snow");
        assert!(forecast.is_daytime());
        assert_eq!(forecast.category(), WeatherCategory::Snow);
    }

    #[test]
    fn test_from_periods_too_short() {
        let err = Forecast::from_periods([(70, "Sunny", true); 5]).unwrap_err();
        assert_eq!(err.to_string(), "Expected 24 forecast periods, got 5");
        assert!(Forecast::from_periods(Vec::new()).is_err());
    }
}
