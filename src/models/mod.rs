pub mod disease;
pub mod forecast;
pub mod localized;
pub mod risk;
pub mod weather;

pub use disease::*;
pub use forecast::*;
pub use localized::*;
pub use risk::*;
pub use weather::*;
