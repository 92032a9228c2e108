use serde::Deserialize;

use crate::{
    WeatherError,
    model::{Coordinates, NormalizedObservation, UNKNOWN_CONDITION, mps_to_kph},
    provider::{Endpoint, ProviderId, WeatherSource, parse_json},
    weather_code,
};

/// Tomorrow.io realtime endpoint. Conditions arrive as numeric codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tomorrow;

impl WeatherSource for Tomorrow {
    fn id(&self) -> ProviderId {
        ProviderId::Tomorrow
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.tomorrow.io"
    }

    fn endpoint(&self, coords: &Coordinates, api_key: &str) -> Endpoint {
        Endpoint {
            path: "/v4/weather/realtime".to_string(),
            query: vec![("location", coords.pair()), ("apikey", api_key.to_string())],
        }
    }

    fn normalize(&self, body: &str) -> Result<NormalizedObservation, WeatherError> {
        let parsed: TmResponse = parse_json(self.id(), body)?;
        let values = parsed
            .data
            .and_then(|data| data.values)
            .ok_or_else(|| {
                WeatherError::unavailable(self.id(), "response has no `data.values` object")
            })?;

        let condition = values
            .weather_code
            .map(|code| weather_code::describe(code).into_owned())
            .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

        Ok(NormalizedObservation {
            temperature: values.temperature,
            windspeed: mps_to_kph(values.wind_speed),
            humidity: values.humidity,
            uv: values.uv_index,
            condition,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TmValues {
    temperature: f64,
    /// m/s.
    wind_speed: f64,
    humidity: f64,
    uv_index: f64,
    weather_code: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TmData {
    values: Option<TmValues>,
}

#[derive(Debug, Deserialize)]
struct TmResponse {
    data: Option<TmData>,
}
