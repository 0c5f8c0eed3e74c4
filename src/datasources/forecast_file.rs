use crate::error::{CropRiskError, Result};
use crate::models::ForecastDay;
use std::path::Path;

/// Read forecast days from a JSON array on disk, returned in date order.
pub fn load_forecast(path: &Path) -> Result<Vec<ForecastDay>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CropRiskError::NotFound(format!("forecast file {}: {}", path.display(), e))
    })?;
    parse_forecast(&content)
}

pub fn parse_forecast(content: &str) -> Result<Vec<ForecastDay>> {
    let mut days: Vec<ForecastDay> = serde_json::from_str(content)?;

    if let Some(bad) = days
        .iter()
        .find(|d| !d.temp_max_c.is_finite() || !d.temp_min_c.is_finite() || !d.rain_mm.is_finite())
    {
        return Err(CropRiskError::InvalidData(format!(
            "non-finite weather value on {}",
            bad.date
        )));
    }

    for day in days.iter_mut().filter(|d| d.rain_mm < 0.0) {
        tracing::debug!("Clamping negative rainfall {} mm on {}", day.rain_mm, day.date);
        day.rain_mm = 0.0;
    }

    days.sort_by_key(|d| d.date);
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_sorts() {
        let days = parse_forecast(
            r#"[
                {"date": "2025-06-02", "temp_max_c": 30.0, "temp_min_c": 24.0, "rain_mm": 3.0},
                {"date": "2025-06-01", "temp_max_c": 31.0, "temp_min_c": 25.0, "rain_mm": 0.0,
                 "temp_mean_c": 27.0}
            ]"#,
        )
        .unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].temp_mean_c(), 27.0);
        assert_eq!(days[1].temp_mean_c(), 27.0);
    }

    #[test]
    fn negative_rain_is_clamped_to_zero() {
        let days = parse_forecast(
            r#"[{"date": "2025-06-01", "temp_max_c": 33.0, "temp_min_c": 27.0, "rain_mm": -5.0}]"#,
        )
        .unwrap();
        assert_eq!(days[0].rain_mm, 0.0);
        assert_eq!(crate::logic::aggregate(&days).unwrap().total_rain_mm, 0.0);
    }

    #[test]
    fn empty_array_is_empty_forecast() {
        assert!(parse_forecast("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_forecast("{\"days\": 3}"),
            Err(CropRiskError::Json(_))
        ));
    }
}
