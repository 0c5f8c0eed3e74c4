use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropRiskError {
    #[error("Insufficient data: forecast contains no days")]
    InsufficientData,

    #[error("Unknown disease: {0}")]
    UnknownDisease(String),

    #[error("Risk model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Risk model inference failed: {0}")]
    ModelInference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, CropRiskError>;
