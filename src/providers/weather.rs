//! OpenWeather forecast client
//!
//! Destination cities are resolved through a fixed coordinate table, the
//! same set the original deployment supported.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::planner::task::WeatherDay;
use crate::types::DateRange;

const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Known destination coordinates
const CITY_COORDINATES: &[(&str, f64, f64)] = &[
    ("mumbai", 19.0760, 72.8777),
    ("delhi", 28.6139, 77.2090),
    ("bangalore", 12.9716, 77.5946),
    ("goa", 15.2993, 74.1240),
    ("manali", 32.2396, 77.1887),
    ("jaipur", 26.9124, 75.7873),
    ("kolkata", 22.5726, 88.3639),
    ("chennai", 13.0827, 80.2707),
    ("hyderabad", 17.3850, 78.4867),
    ("pune", 18.5204, 73.8567),
    ("kochi", 9.9312, 76.2673),
    ("ahmedabad", 23.0225, 72.5714),
    ("shimla", 31.1048, 77.1734),
    ("darjeeling", 27.0379, 88.2622),
];

/// Look up coordinates for a destination city
pub fn city_coordinates(city: &str) -> Option<(f64, f64)> {
    let city = city.trim().to_lowercase();
    CITY_COORDINATES
        .iter()
        .find(|(name, _, _)| *name == city)
        .map(|(_, lat, lon)| (*lat, *lon))
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    /// "2026-11-23 09:00:00"
    dt_txt: String,
    main: ForecastMain,
    weather: Vec<ForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp_min: f32,
    temp_max: f32,
}

#[derive(Debug, Deserialize)]
struct ForecastWeather {
    description: String,
}

/// OpenWeather 5-day / 3-hour forecast client
#[derive(Clone)]
pub struct WeatherClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url,
            api_key,
        }
    }

    /// Daily forecast for the destination over the trip dates. Days beyond
    /// the provider's 5-day horizon are simply absent from the result.
    pub async fn forecast(&self, destination: &str, dates: DateRange) -> Result<Vec<WeatherDay>> {
        let (lat, lon) = city_coordinates(destination)
            .with_context(|| format!("unknown destination city '{}'", destination))?;

        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .context("forecast request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("forecast endpoint returned {}: {}", status, body);
        }

        let parsed: ForecastResponse = response
            .json()
            .await
            .context("failed to parse forecast response")?;

        Ok(collapse_daily(parsed.list, dates))
    }
}

/// Fold 3-hourly entries into one summary per trip day
fn collapse_daily(entries: Vec<ForecastEntry>, dates: DateRange) -> Vec<WeatherDay> {
    let mut days: BTreeMap<NaiveDate, WeatherDay> = BTreeMap::new();
    for entry in entries {
        let Some(date) = entry
            .dt_txt
            .split_whitespace()
            .next()
            .and_then(|d| d.parse::<NaiveDate>().ok())
        else {
            continue;
        };
        if date < dates.start || date > dates.end {
            continue;
        }
        let summary = entry
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "clear".to_string());
        days.entry(date)
            .and_modify(|d| {
                d.high_c = d.high_c.max(entry.main.temp_max);
                d.low_c = d.low_c.min(entry.main.temp_min);
            })
            .or_insert(WeatherDay {
                date,
                summary,
                high_c: entry.main.temp_max,
                low_c: entry.main.temp_min,
            });
    }
    days.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dt: &str, min: f32, max: f32, desc: &str) -> ForecastEntry {
        ForecastEntry {
            dt_txt: dt.to_string(),
            main: ForecastMain {
                temp_min: min,
                temp_max: max,
            },
            weather: vec![ForecastWeather {
                description: desc.to_string(),
            }],
        }
    }

    #[test]
    fn known_city_resolves() {
        assert!(city_coordinates("Goa").is_some());
        assert!(city_coordinates("  MANALI ").is_some());
        assert!(city_coordinates("Atlantis").is_none());
    }

    #[test]
    fn collapses_hourly_entries_per_day() {
        let dates = DateRange::new(
            "2026-11-23".parse().unwrap(),
            "2026-11-24".parse().unwrap(),
        );
        let days = collapse_daily(
            vec![
                entry("2026-11-23 09:00:00", 18.0, 26.0, "clear sky"),
                entry("2026-11-23 15:00:00", 20.0, 29.0, "few clouds"),
                entry("2026-11-24 09:00:00", 17.0, 25.0, "light rain"),
                // outside the trip window
                entry("2026-11-26 09:00:00", 10.0, 15.0, "snow"),
            ],
            dates,
        );
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].high_c, 29.0);
        assert_eq!(days[0].low_c, 18.0);
        assert_eq!(days[0].summary, "clear sky");
        assert_eq!(days[1].summary, "light rain");
    }
}
