use crate::config::WeatherConfig;
use crate::error::{CropRiskError, Result};
use crate::models::ForecastDay;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

// Open-Meteo API response structures
#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    timezone: Option<String>,
    daily: OmDaily,
}

/// Column-oriented daily series; values are null where the model has no data
#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn forecast_url(&self, latitude: f64, longitude: f64, days: u8) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&forecast_days={}&timezone=auto",
            self.config.base_url.trim_end_matches('/'),
            latitude,
            longitude,
            DAILY_FIELDS,
            days
        )
    }

    /// Fetch the daily forecast for a location
    pub async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<ForecastDay>> {
        if !self.config.enabled {
            return Err(CropRiskError::DataSourceUnavailable(
                "Open-Meteo is disabled in config".into(),
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CropRiskError::InvalidData(format!(
                "coordinates out of range: {}, {}",
                latitude, longitude
            )));
        }

        let url = self.forecast_url(latitude, longitude, self.config.forecast_days);
        tracing::debug!("Fetching forecast: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CropRiskError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropRiskError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmForecastResponse = response.json().await.map_err(|e| {
            CropRiskError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        let days = convert_response(om_response)?;
        tracing::info!(
            "Fetched {} forecast days for ({:.4}, {:.4})",
            days.len(),
            latitude,
            longitude
        );
        Ok(days)
    }

    /// Test connection to the Open-Meteo API with a one-day request
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.forecast_url(0.0, 0.0, 1);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CropRiskError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

/// Turn the column arrays into forecast days.
///
/// Missing precipitation counts as dry. Days missing either temperature are
/// dropped rather than guessed.
fn convert_response(response: OmForecastResponse) -> Result<Vec<ForecastDay>> {
    let daily = response.daily;
    let mut days = Vec::with_capacity(daily.time.len());

    for (i, raw_date) in daily.time.iter().enumerate() {
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|e| {
            CropRiskError::InvalidData(format!("bad forecast date '{}': {}", raw_date, e))
        })?;

        let tmax = daily.temperature_2m_max.get(i).copied().flatten();
        let tmin = daily.temperature_2m_min.get(i).copied().flatten();
        let (Some(tmax), Some(tmin)) = (tmax, tmin) else {
            tracing::debug!("Skipping {}: temperature missing", date);
            continue;
        };
        let rain = daily
            .precipitation_sum
            .get(i)
            .copied()
            .flatten()
            .unwrap_or(0.0);

        days.push(ForecastDay::new(date, tmax, tmin, rain));
    }

    if let Some(tz) = &response.timezone {
        tracing::trace!("Forecast dates are local to {}", tz);
    }

    Ok(days)
}
