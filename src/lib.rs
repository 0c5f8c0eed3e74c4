pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod model;
pub mod models;

pub use error::{CropRiskError, Result};
pub use logic::RiskEngine;
pub use model::ModelHandle;
