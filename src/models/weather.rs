use serde::{Deserialize, Serialize};

/// Scalar summary of a forecast window, derived per request.
///
/// `estimated_humidity_pct` is a proxy from the diurnal temperature range, not
/// a measured value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateWeatherStats {
    pub days: usize,
    pub mean_temp_c: f64,
    pub total_rain_mm: f64,
    pub temp_range_avg_c: f64,
    pub estimated_humidity_pct: f64,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
}
