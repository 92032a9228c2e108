use serde::Deserialize;

use crate::{
    WeatherError,
    model::{Coordinates, NormalizedObservation},
    provider::{Endpoint, ProviderId, WeatherSource, parse_json},
};

/// WeatherAPI.com `current.json`. Reports wind in km/h already.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherApi;

impl WeatherSource for WeatherApi {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.weatherapi.com"
    }

    fn endpoint(&self, coords: &Coordinates, api_key: &str) -> Endpoint {
        Endpoint {
            path: "/v1/current.json".to_string(),
            query: vec![("key", api_key.to_string()), ("q", coords.pair())],
        }
    }

    fn normalize(&self, body: &str) -> Result<NormalizedObservation, WeatherError> {
        let parsed: WaResponse = parse_json(self.id(), body)?;
        let current = parsed.current.ok_or_else(|| {
            WeatherError::unavailable(self.id(), "response has no `current` object")
        })?;

        Ok(NormalizedObservation {
            temperature: current.temp_c,
            windspeed: current.wind_kph,
            humidity: current.humidity,
            uv: current.uv,
            condition: current.condition.text,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    wind_kph: f64,
    humidity: f64,
    uv: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: Option<WaCurrent>,
}
