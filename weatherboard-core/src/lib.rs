//! Core library for the `weatherboard` app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - One generic HTTP adapter, instantiated for OpenWeather, WeatherAPI,
//!   Tomorrow.io and Visual Crossing
//! - The normalized observation every adapter produces
//! - Provider views and the selector that mounts them
//!
//! It is used by `weatherboard-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;
pub mod weather_code;

pub use config::{Config, ProviderConfig};
pub use error::WeatherError;
pub use model::{Coordinates, DUBAI, NormalizedObservation};
pub use provider::{Adapter, ProviderId, WeatherProvider, WeatherSource};
pub use view::{ProviderView, Route, ViewSelector, ViewState};
