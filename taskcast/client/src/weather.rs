//! The external weather collaborator.
//!
//! Outdoor tasks are annotated with current conditions and a short
//! forecast. Nothing in the task path depends on this module: a weather
//! failure is a displayable [`WeatherError`] and never disturbs task state.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// How many forecast days the report carries.
const FORECAST_DAYS: usize = 3;

/// Current conditions at a location. Temperatures are imperial and rounded
/// to whole numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temp: i32,
    pub humidity: u32,
    pub wind_speed: i32,
    /// Provider icon code, e.g. `10d` for daytime rain.
    pub condition_code: String,
    pub description: String,
}

/// One forecast entry per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp: i32,
    pub condition_code: String,
}

/// Current conditions plus a short forecast for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub current: CurrentConditions,
    /// The provider's resolved name for the queried location.
    pub location: String,
    pub forecast: Vec<ForecastDay>,
}

/// Errors surfaced by weather lookups.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The provider answered with a non-success status, e.g. for an unknown
    /// location.
    #[error("Weather service error: {0}")]
    Service(StatusCode),
    /// The request never completed or the body could not be decoded.
    #[error("Weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The weather lookup seam consumed by front ends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherApi {
    async fn fetch_weather(&self, location: &str) -> Result<WeatherReport, WeatherError>;
}

// Provider wire shapes, current-weather and 5-day-forecast endpoints.

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    main: MainReadings,
    wind: WindReading,
    weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct WindReading {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainReadings,
    weather: Vec<ConditionEntry>,
}

/// Reqwest-backed [`WeatherApi`] against the OpenWeatherMap API.
pub struct OpenWeather {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeather {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, location, "weather request");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Service(status));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl WeatherApi for OpenWeather {
    #[tracing::instrument(skip(self))]
    async fn fetch_weather(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let current: CurrentWeatherResponse = self.get("weather", location).await?;
        let forecast: ForecastResponse = self.get("forecast", location).await?;
        Ok(report_from(current, forecast, Utc::now().date_naive()))
    }
}

fn report_from(
    current: CurrentWeatherResponse,
    forecast: ForecastResponse,
    today: NaiveDate,
) -> WeatherReport {
    let (description, condition_code) = current
        .weather
        .into_iter()
        .next()
        .map(|entry| (entry.description, entry.icon))
        .unwrap_or_default();

    WeatherReport {
        current: CurrentConditions {
            temp: current.main.temp.round() as i32,
            humidity: current.main.humidity,
            wind_speed: current.wind.speed.round() as i32,
            condition_code,
            description,
        },
        location: current.name,
        forecast: fold_forecast(forecast.list, today),
    }
}

/// Folds the provider's three-hourly forecast list into one entry per
/// calendar day, keeping the three days after `today`. The first reading of
/// each day wins.
fn fold_forecast(entries: Vec<ForecastEntry>, today: NaiveDate) -> Vec<ForecastDay> {
    let mut days: Vec<ForecastDay> = Vec::new();
    for entry in entries {
        let Some(timestamp) = DateTime::from_timestamp(entry.dt, 0) else {
            continue;
        };
        let date = timestamp.date_naive();
        if days.iter().any(|day| day.date == date) {
            continue;
        }
        let condition_code = entry
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.icon)
            .unwrap_or_default();
        days.push(ForecastDay {
            date,
            temp: entry.main.temp.round() as i32,
            condition_code,
        });
    }
    days.into_iter()
        .filter(|day| day.date > today)
        .take(FORECAST_DAYS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dt: i64, temp: f64, icon: &str) -> ForecastEntry {
        ForecastEntry {
            dt,
            main: MainReadings { temp, humidity: 50 },
            weather: vec![ConditionEntry {
                description: "scattered clouds".to_string(),
                icon: icon.to_string(),
            }],
        }
    }

    fn utc_timestamp(date: &str, hour: u32) -> i64 {
        let day: NaiveDate = date.parse().unwrap();
        day.and_hms_opt(hour, 0, 0).unwrap().and_utc().timestamp()
    }

    #[test]
    fn keeps_the_first_reading_of_each_day() {
        let today: NaiveDate = "2026-08-04".parse().unwrap();
        let entries = vec![
            entry(utc_timestamp("2026-08-05", 0), 71.2, "03d"),
            entry(utc_timestamp("2026-08-05", 3), 65.0, "10n"),
            entry(utc_timestamp("2026-08-06", 0), 80.0, "01d"),
        ];

        let days = fold_forecast(entries, today);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].temp, 71);
        assert_eq!(days[0].condition_code, "03d");
        assert_eq!(days[1].temp, 80);
    }

    #[test]
    fn keeps_only_the_three_days_after_today() {
        let today: NaiveDate = "2026-08-04".parse().unwrap();
        let entries = vec![
            entry(utc_timestamp("2026-08-04", 12), 70.0, "01d"),
            entry(utc_timestamp("2026-08-05", 12), 71.0, "01d"),
            entry(utc_timestamp("2026-08-06", 12), 72.0, "01d"),
            entry(utc_timestamp("2026-08-07", 12), 73.0, "01d"),
            entry(utc_timestamp("2026-08-08", 12), 74.0, "01d"),
        ];

        let days = fold_forecast(entries, today);

        let dates: Vec<String> = days.iter().map(|day| day.date.to_string()).collect();
        assert_eq!(dates, ["2026-08-05", "2026-08-06", "2026-08-07"]);
    }

    #[test]
    fn returns_an_empty_forecast_for_an_empty_list() {
        let today: NaiveDate = "2026-08-04".parse().unwrap();

        assert!(fold_forecast(vec![], today).is_empty());
    }

    #[test]
    fn rounds_readings_to_whole_numbers() {
        let current = CurrentWeatherResponse {
            name: "New York".to_string(),
            main: MainReadings {
                temp: 72.6,
                humidity: 65,
            },
            wind: WindReading { speed: 8.4 },
            weather: vec![ConditionEntry {
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            }],
        };
        let forecast = ForecastResponse { list: vec![] };

        let report = report_from(current, forecast, "2026-08-04".parse().unwrap());

        assert_eq!(report.current.temp, 73);
        assert_eq!(report.current.wind_speed, 8);
        assert_eq!(report.current.condition_code, "10d");
        assert_eq!(report.location, "New York");
    }

    #[test]
    fn can_decode_the_provider_payloads() {
        let current: CurrentWeatherResponse = serde_json::from_str(
            r#"{
                "name": "London",
                "main": {"temp": 61.3, "humidity": 81},
                "wind": {"speed": 12.7},
                "weather": [{"main": "Clouds", "description": "overcast clouds", "icon": "04d"}]
            }"#,
        )
        .unwrap();
        let forecast: ForecastResponse = serde_json::from_str(
            r#"{"list": [{"dt": 1754524800, "main": {"temp": 63.0, "humidity": 70},
                "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}]}]}"#,
        )
        .unwrap();

        assert_eq!(current.name, "London");
        assert_eq!(current.main.humidity, 81);
        assert_eq!(forecast.list.len(), 1);
        assert_eq!(forecast.list[0].weather[0].icon, "10d");
    }

    #[test]
    fn serializes_the_report_with_camel_case_keys() {
        let report = WeatherReport {
            current: CurrentConditions {
                temp: 73,
                humidity: 65,
                wind_speed: 8,
                condition_code: "10d".to_string(),
                description: "light rain".to_string(),
            },
            location: "New York".to_string(),
            forecast: vec![],
        };

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["current"]["windSpeed"], 8);
        assert_eq!(json["current"]["conditionCode"], "10d");
    }
}
