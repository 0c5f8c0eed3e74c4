use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of forecast weather, as delivered by the upstream weather source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    /// Defaults to the max/min midpoint when the source does not supply it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temp_mean_c: Option<f64>,
    pub rain_mm: f64,
}

impl ForecastDay {
    pub fn new(date: NaiveDate, temp_max_c: f64, temp_min_c: f64, rain_mm: f64) -> Self {
        Self {
            date,
            temp_max_c,
            temp_min_c,
            temp_mean_c: None,
            rain_mm: rain_mm.max(0.0),
        }
    }

    pub fn with_mean(mut self, temp_mean_c: f64) -> Self {
        self.temp_mean_c = Some(temp_mean_c);
        self
    }

    pub fn temp_mean_c(&self) -> f64 {
        self.temp_mean_c
            .unwrap_or((self.temp_max_c + self.temp_min_c) / 2.0)
    }

    pub fn temp_range_c(&self) -> f64 {
        self.temp_max_c - self.temp_min_c
    }

    /// Humidity proxy for a single day (see [`estimate_humidity`])
    pub fn estimated_humidity_pct(&self) -> f64 {
        estimate_humidity(self.temp_range_c())
    }
}

/// Estimate relative humidity from the diurnal temperature range.
///
/// The forecast source does not deliver humidity, so a wide day/night swing is
/// read as dry air. Result is a proxy clamped to 30-100%, never a measurement.
pub fn estimate_humidity(temp_range_c: f64) -> f64 {
    (95.0 - 2.5 * temp_range_c).clamp(30.0, 100.0)
}
