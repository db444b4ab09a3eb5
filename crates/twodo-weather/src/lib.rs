/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public twodo-weather crate surface
[POS]:    Crate root - weather collaborator shown beside the task list
[UPDATE]: When public modules or exports change
*/

pub mod client;
pub mod error;
pub mod location;
pub mod types;

pub use client::{ClientConfig, WeatherClient};
pub use error::{Result, WeatherError};
pub use location::{FALLBACK_LOCATION, LocationSource};
pub use types::{Coordinates, WeatherKind, WeatherReport};
