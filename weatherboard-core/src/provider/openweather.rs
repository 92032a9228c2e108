use serde::Deserialize;

use crate::{
    WeatherError,
    model::{Coordinates, NormalizedObservation, UNKNOWN_CONDITION, mps_to_kph},
    provider::{Endpoint, ProviderId, WeatherSource, parse_json},
};

/// OpenWeather One Call 3.0, current block only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenWeather;

impl WeatherSource for OpenWeather {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.openweathermap.org"
    }

    fn endpoint(&self, coords: &Coordinates, api_key: &str) -> Endpoint {
        Endpoint {
            path: "/data/3.0/onecall".to_string(),
            query: vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("units", "metric".to_string()),
                ("exclude", "minutely,hourly,daily,alerts".to_string()),
                ("appid", api_key.to_string()),
            ],
        }
    }

    fn normalize(&self, body: &str) -> Result<NormalizedObservation, WeatherError> {
        let parsed: OwResponse = parse_json(self.id(), body)?;
        let current = parsed.current.ok_or_else(|| {
            WeatherError::unavailable(self.id(), "response has no `current` object")
        })?;

        let condition = current
            .weather
            .first()
            .map(|w| w.main.clone())
            .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

        Ok(NormalizedObservation {
            temperature: current.temp,
            windspeed: mps_to_kph(current.wind_speed),
            humidity: current.humidity,
            uv: current.uvi,
            condition,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    temp: f64,
    /// m/s with `units=metric`.
    wind_speed: f64,
    humidity: f64,
    uvi: f64,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwResponse {
    current: Option<OwCurrent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DUBAI;

    #[test]
    fn endpoint_requests_metric_current_block() {
        let endpoint = OpenWeather.endpoint(&DUBAI, "OW");

        assert_eq!(endpoint.path, "/data/3.0/onecall");
        assert!(endpoint.query.contains(&("lat", "25.2521415".to_string())));
        assert!(endpoint.query.contains(&("lon", "55.2925677".to_string())));
        assert!(endpoint.query.contains(&("units", "metric".to_string())));
        assert!(endpoint.query.contains(&("exclude", "minutely,hourly,daily,alerts".to_string())));
        assert!(endpoint.query.contains(&("appid", "OW".to_string())));
    }

    #[test]
    fn normalizes_current_block() {
        let body = r#"{
            "lat": 25.2521,
            "current": {
                "temp": 28.4,
                "wind_speed": 3.0,
                "humidity": 55,
                "uvi": 6,
                "weather": [{ "id": 800, "main": "Clear", "description": "clear sky" }]
            }
        }"#;

        let obs = OpenWeather.normalize(body).expect("observation");

        assert_eq!(obs.temperature, 28.4);
        assert_eq!(obs.windspeed, 10.8);
        assert_eq!(obs.humidity, 55.0);
        assert_eq!(obs.uv, 6.0);
        assert_eq!(obs.condition, "Clear");
    }

    #[test]
    fn empty_weather_list_is_unknown() {
        let body = r#"{"current":{"temp":20.0,"wind_speed":1.0,"humidity":10,"uvi":0,"weather":[]}}"#;

        let obs = OpenWeather.normalize(body).expect("observation");
        assert_eq!(obs.condition, "Unknown");
        assert_eq!(obs.windspeed, 3.6);
    }

    #[test]
    fn missing_current_is_unavailable() {
        let err = OpenWeather.normalize("{}").unwrap_err();
        assert!(err.to_string().contains("`current`"));

        let err = OpenWeather.normalize(r#"{"cod":401,"message":"Invalid API key"}"#).unwrap_err();
        assert_eq!(err.provider(), ProviderId::OpenWeather);
    }

    #[test]
    fn malformed_current_is_unavailable() {
        let err = OpenWeather.normalize(r#"{"current":{"temp":"hot"}}"#).unwrap_err();
        assert!(err.to_string().contains("invalid response"));
    }
}
