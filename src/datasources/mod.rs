pub mod forecast_file;
pub mod openmeteo;
pub mod regions;

pub use forecast_file::load_forecast;
pub use openmeteo::OpenMeteoClient;
pub use regions::District;
