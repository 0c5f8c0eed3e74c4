pub mod categorical;
pub mod continuous;

pub use categorical::{
    categorical_score, categorical_severity_multiplier, representative_score, CategoricalScore,
};
pub use continuous::{
    continuous_severity_weight, day_score, rain_score, score_forecast, temp_score, DayScore,
    WeatherIndex,
};
