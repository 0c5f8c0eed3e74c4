use crate::error::{CropRiskError, Result};
use crate::models::{estimate_humidity, AggregateWeatherStats, ForecastDay};

/// Reduce a forecast window to the statistics the scorers consume.
///
/// Fails with `InsufficientData` on an empty forecast; the caller decides the
/// default.
pub fn aggregate(days: &[ForecastDay]) -> Result<AggregateWeatherStats> {
    if days.is_empty() {
        return Err(CropRiskError::InsufficientData);
    }

    let n = days.len() as f64;
    let mean_temp_c = days.iter().map(|d| d.temp_mean_c()).sum::<f64>() / n;
    let total_rain_mm = total_rain(days);
    let temp_range_avg_c = days.iter().map(|d| d.temp_range_c()).sum::<f64>() / n;

    let max_temp_c = days
        .iter()
        .map(|d| d.temp_max_c)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_temp_c = days
        .iter()
        .map(|d| d.temp_min_c)
        .fold(f64::INFINITY, f64::min);

    Ok(AggregateWeatherStats {
        days: days.len(),
        mean_temp_c,
        total_rain_mm,
        temp_range_avg_c,
        estimated_humidity_pct: estimate_humidity(temp_range_avg_c),
        max_temp_c,
        min_temp_c,
    })
}

/// Total rainfall over the window, ignoring negative sensor artefacts
pub fn total_rain(days: &[ForecastDay]) -> f64 {
    days.iter().map(|d| d.rain_mm).filter(|r| *r >= 0.0).sum()
}
