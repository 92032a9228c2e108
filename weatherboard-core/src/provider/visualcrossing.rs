use serde::Deserialize;

use crate::{
    WeatherError,
    model::{Coordinates, NormalizedObservation, UNKNOWN_CONDITION},
    provider::{Endpoint, ProviderId, WeatherSource, parse_json},
};

/// Visual Crossing timeline API, today's current conditions in metric units.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualCrossing;

impl WeatherSource for VisualCrossing {
    fn id(&self) -> ProviderId {
        ProviderId::VisualCrossing
    }

    fn default_base_url(&self) -> &'static str {
        "https://weather.visualcrossing.com"
    }

    fn endpoint(&self, coords: &Coordinates, api_key: &str) -> Endpoint {
        Endpoint {
            path: format!(
                "/VisualCrossingWebServices/rest/services/timeline/{}/today",
                coords.pair()
            ),
            query: vec![
                ("unitGroup", "metric".to_string()),
                ("include", "current".to_string()),
                ("key", api_key.to_string()),
                ("contentType", "json".to_string()),
            ],
        }
    }

    fn normalize(&self, body: &str) -> Result<NormalizedObservation, WeatherError> {
        let parsed: VcResponse = parse_json(self.id(), body)?;
        let current = parsed.current_conditions.ok_or_else(|| {
            WeatherError::unavailable(self.id(), "response has no `currentConditions` object")
        })?;

        let condition = current
            .conditions
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

        Ok(NormalizedObservation {
            temperature: current.temp,
            windspeed: current.windspeed,
            humidity: current.humidity,
            uv: current.uvindex,
            condition,
        })
    }
}

#[derive(Debug, Deserialize)]
struct VcCurrent {
    temp: f64,
    /// km/h with `unitGroup=metric`.
    windspeed: f64,
    humidity: f64,
    uvindex: f64,
    conditions: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VcResponse {
    current_conditions: Option<VcCurrent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DUBAI;

    #[test]
    fn endpoint_puts_location_in_path() {
        let endpoint = VisualCrossing.endpoint(&DUBAI, "VC");

        assert_eq!(
            endpoint.path,
            "/VisualCrossingWebServices/rest/services/timeline/25.2521415,55.2925677/today"
        );
        assert!(endpoint.query.contains(&("key", "VC".to_string())));
        assert!(endpoint.query.contains(&("unitGroup", "metric".to_string())));
        assert!(endpoint.query.contains(&("include", "current".to_string())));
        assert!(endpoint.query.contains(&("contentType", "json".to_string())));
    }

    #[test]
    fn normalizes_current_conditions() {
        let body = r#"{
            "resolvedAddress": "25.2521415,55.2925677",
            "currentConditions": {
                "datetime": "13:00:00",
                "temp": 34.6,
                "windspeed": 22.3,
                "humidity": 41.7,
                "uvindex": 9,
                "conditions": "Partially cloudy"
            }
        }"#;

        let obs = VisualCrossing.normalize(body).expect("observation");

        assert_eq!(obs.temperature, 34.6);
        assert_eq!(obs.windspeed, 22.3);
        assert_eq!(obs.humidity, 41.7);
        assert_eq!(obs.uv, 9.0);
        assert_eq!(obs.condition, "Partially cloudy");
    }

    #[test]
    fn missing_conditions_default_to_unknown() {
        let body = r#"{"currentConditions":{"temp":25.0,"windspeed":5.0,"humidity":60,"uvindex":2}}"#;
        let obs = VisualCrossing.normalize(body).expect("observation");
        assert_eq!(obs.condition, "Unknown");

        let body = r#"{"currentConditions":{"temp":25.0,"windspeed":5.0,"humidity":60,"uvindex":2,"conditions":""}}"#;
        let obs = VisualCrossing.normalize(body).expect("observation");
        assert_eq!(obs.condition, "Unknown");
    }

    #[test]
    fn missing_current_conditions_is_unavailable() {
        let err = VisualCrossing.normalize(r#"{"days":[]}"#).unwrap_err();
        assert!(err.to_string().contains("`currentConditions`"));
    }

    #[test]
    fn plain_text_error_body_is_unavailable() {
        let err = VisualCrossing.normalize("No account found with API key ''").unwrap_err();
        assert!(err.to_string().starts_with("Visual Crossing data unavailable: invalid response"));
    }
}
