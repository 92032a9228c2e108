use serde::{Deserialize, Serialize};

/// Geographic point the providers are queried for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Dubai, the location every view observes.
pub const DUBAI: Coordinates = Coordinates {
    latitude: 25.2521415,
    longitude: 55.2925677,
};

impl Coordinates {
    /// `"lat,lon"`, the form WeatherAPI, Tomorrow.io and Visual Crossing expect.
    pub fn pair(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Current conditions mapped into the shape shared by all providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedObservation {
    /// °C, unrounded.
    pub temperature: f64,
    /// km/h.
    pub windspeed: f64,
    /// Relative humidity, %.
    pub humidity: f64,
    /// UV index on the provider's own scale.
    pub uv: f64,
    pub condition: String,
}

/// Condition text used when a provider omits it.
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Converts m/s to km/h, keeping one decimal.
pub fn mps_to_kph(mps: f64) -> f64 {
    round1(mps * 3.6)
}
