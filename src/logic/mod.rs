pub mod aggregator;
pub mod alerts;
pub mod classifier;
pub mod engine;
pub mod explanation;
pub mod profiles;
pub mod rules;

pub use aggregator::aggregate;
pub use alerts::{action_guide, ActionGuide};
pub use classifier::{Classification, RiskClassifier};
pub use engine::RiskEngine;
pub use explanation::{explain, outlook};
pub use rules::WeatherIndex;
