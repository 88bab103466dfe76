use crate::{config::Config, forecast::Forecast};
use anyhow::{anyhow, Context};
use log::{error, info, warn};
use serde::Deserialize;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, RwLock,
    },
    thread,
    time::{Duration, Instant},
};

/// Gotta know weather or not it's gonna rain
#[derive(Debug)]
pub struct Weather {
    url: String,
    ttl: Duration,
    /// Latest forecast. The fetch is done in a separate thread and deposited
    /// here
    forecast: Arc<RwLock<Option<Forecast>>>,
    /// Set while a fetch thread is running, so we never stack them up
    fetching: Arc<AtomicBool>,
    /// When the last fetch was started. Failures count too, so a dead API
    /// gets retried once per TTL rather than every frame
    last_fetch: Option<Instant>,
}

impl Weather {
    const API_HOST: &'static str = "https://api.weather.gov";
    /// The API rejects requests without one
    const USER_AGENT: &'static str =
        concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    pub fn new(config: &Config) -> Self {
        let url = format!(
            "{}/gridpoints/{}/{},{}/forecast/hourly",
            Self::API_HOST,
            config.forecast_office,
            config.forecast_gridpoint.0,
            config.forecast_gridpoint.1
        );
        Self {
            url,
            ttl: config.forecast_ttl(),
            forecast: Default::default(),
            fetching: Default::default(),
            last_fetch: None,
        }
    }

    /// Get the latest forecast, without blocking. If it's missing or
    /// outdated, spawn a thread to re-fetch it. Old is better than nothing,
    /// so a stale forecast is returned as-is until a new one lands.
    pub fn forecast(&mut self) -> Option<Forecast> {
        let now = Instant::now();
        if self.is_due(now) {
            self.last_fetch = Some(now);
            self.fetch_latest();
        }

        let Some(guard) = self.forecast.try_read().ok() else {
            // Contention is so low that we don't ever expect to hit this
            warn!("Failed to grab forecast read lock");
            return None;
        };
        // Clone the forecast so we can release the lock
        guard.clone()
    }

    /// Is it time to start another fetch?
    fn is_due(&self, now: Instant) -> bool {
        let expired = self
            .last_fetch
            .map_or(true, |last_fetch| last_fetch + self.ttl <= now);
        expired && !self.fetching.load(Ordering::Acquire)
    }

    /// Spawn a thread to fetch the latest forecast in the background
    fn fetch_latest(&self) {
        let lock = Arc::clone(&self.forecast);
        let fetching = FetchGuard::start(Arc::clone(&self.fetching));
        let request = ureq::get(&self.url).set("User-Agent", Self::USER_AGENT);

        thread::spawn(move || {
            // Clears the in-flight flag when the thread ends, even by panic
            let _fetching = fetching;
            // Shitty try block
            let result: anyhow::Result<()> = (|| {
                info!("Fetching new forecast");
                let response = request.call().with_context(|| {
                    format!("Error fetching forecast from {}", Self::API_HOST)
                })?;
                let response: ForecastResponse = response
                    .into_json()
                    .context("Error parsing forecast as JSON")?;
                let forecast = response.into_forecast()?;
                info!(
                    "Saving forecast: {} {}°",
                    forecast.short_forecast(),
                    forecast.now()
                );
                // Stringify the error to dump the lifetime
                *lock.write().map_err(|err| anyhow!("{err}"))? = Some(forecast);
                Ok(())
            })();

            // On failure the previous forecast stays in place
            if let Err(err) = result {
                error!("Error fetching forecast: {err:?}")
            }
        });
    }
}

/// Holds the in-flight flag up for as long as it's alive
#[derive(Debug)]
struct FetchGuard(Arc<AtomicBool>);

impl FetchGuard {
    fn start(flag: Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// https://www.weather.gov/documentation/services-web-api#/default/gridpoint_forecast
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPeriod {
    temperature: i32,
    short_forecast: String,
    is_daytime: bool,
}

impl ForecastResponse {
    fn into_forecast(self) -> anyhow::Result<Forecast> {
        Forecast::from_periods(self.properties.periods.iter().map(|period| {
            (
                period.temperature,
                period.short_forecast.as_str(),
                period.is_daytime,
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{WeatherCategory, HOURS};
    use serde_json::json;

    fn config() -> Config {
        serde_json::from_value(json!({
            "forecast_office": "BOX",
            "forecast_gridpoint": [71, 90],
            "forecast_ttl_secs": 30,
        }))
        .unwrap()
    }

    fn period(temperature: i32, short_forecast: &str) -> serde_json::Value {
        json!({
            "number": 1,
            "startTime": "2024-05-24T17:00:00-04:00",
            "endTime": "2024-05-24T18:00:00-04:00",
            "isDaytime": false,
            "temperature": temperature,
            "temperatureUnit": "F",
            "probabilityOfPrecipitation": {
                "unitCode": "wmoUnit:percent",
                "value": 1,
            },
            "shortForecast": short_forecast,
        })
    }

    #[test]
    fn test_url() {
        let weather = Weather::new(&config());
        assert_eq!(
            weather.url,
            "https://api.weather.gov/gridpoints/BOX/71,90/forecast/hourly"
        );
        assert_eq!(weather.ttl, Duration::from_secs(30));
    }

    #[test]
    fn test_parse_response() {
        let periods: Vec<_> = (0..156)
            .map(|i| period(60 + i % 10, "Mostly Clear"))
            .collect();
        let response: ForecastResponse = serde_json::from_value(json!({
            "type": "Feature",
            "properties": {"units": "us", "periods": periods},
        }))
        .unwrap();

        let forecast = response.into_forecast().unwrap();
        assert_eq!(forecast.temperatures()[..3], [60, 61, 62]);
        assert_eq!(forecast.temperatures()[HOURS - 1], 63);
        assert_eq!(forecast.category(), WeatherCategory::ClearNight);
    }

    #[test]
    fn test_parse_response_too_short() {
        let response: ForecastResponse = serde_json::from_value(json!({
            "properties": {"periods": [period(70, "Sunny")]},
        }))
        .unwrap();
        assert!(response.into_forecast().is_err());
    }

    #[test]
    fn test_is_due() {
        let mut weather = Weather::new(&config());
        let start = Instant::now();
        assert!(weather.is_due(start));

        weather.last_fetch = Some(start);
        assert!(!weather.is_due(start + Duration::from_secs(29)));
        assert!(weather.is_due(start + Duration::from_secs(30)));

        // Never overlap fetches
        weather.fetching.store(true, Ordering::Release);
        assert!(!weather.is_due(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_fetch_guard_cleared_on_panic() {
        let flag = Arc::new(AtomicBool::new(false));
        let guard = FetchGuard::start(Arc::clone(&flag));
        assert!(flag.load(Ordering::Acquire));

        let result = thread::spawn(move || {
            let _guard = guard;
            panic!("fetch blew up");
        })
        .join();
        assert!(result.is_err());
        assert!(!flag.load(Ordering::Acquire));
    }
}
