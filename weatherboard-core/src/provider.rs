use crate::{
    Config, WeatherError,
    model::{Coordinates, NormalizedObservation},
    provider::{
        openweather::OpenWeather, tomorrow::Tomorrow, visualcrossing::VisualCrossing,
        weatherapi::WeatherApi,
    },
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub mod openweather;
pub mod tomorrow;
pub mod visualcrossing;
pub mod weatherapi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    WeatherApi,
    Tomorrow,
    VisualCrossing,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::WeatherApi => "weatherapi",
            ProviderId::Tomorrow => "tomorrow",
            ProviderId::VisualCrossing => "visualcrossing",
        }
    }

    /// Name shown on cards, in the index and in log messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OpenWeather",
            ProviderId::WeatherApi => "WeatherAPI",
            ProviderId::Tomorrow => "Tomorrow.io",
            ProviderId::VisualCrossing => "Visual Crossing",
        }
    }

    /// Route under which the provider's view is mounted.
    pub fn route(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "/openweather",
            ProviderId::WeatherApi => "/weatherapi",
            ProviderId::Tomorrow => "/tomorrowapi",
            ProviderId::VisualCrossing => "/visualcrossing",
        }
    }

    /// Environment variable that overrides the configured API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OPENWEATHER_API_KEY",
            ProviderId::WeatherApi => "WEATHERAPI_KEY",
            ProviderId::Tomorrow => "TOMORROW_API_KEY",
            ProviderId::VisualCrossing => "VISUALCROSSING_API_KEY",
        }
    }

    /// True for providers whose wind speed arrives in m/s and is converted to
    /// km/h; those are shown with one decimal.
    pub fn reports_wind_in_mps(&self) -> bool {
        matches!(self, ProviderId::OpenWeather | ProviderId::Tomorrow)
    }

    pub const fn all() -> &'static [ProviderId] {
        &[
            ProviderId::OpenWeather,
            ProviderId::WeatherApi,
            ProviderId::Tomorrow,
            ProviderId::VisualCrossing,
        ]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "weatherapi" => Ok(ProviderId::WeatherApi),
            "tomorrow" | "tomorrowapi" | "tomorrow.io" => Ok(ProviderId::Tomorrow),
            "visualcrossing" | "visual-crossing" => Ok(ProviderId::VisualCrossing),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, weatherapi, tomorrow, visualcrossing."
            )),
        }
    }
}

/// Request target of a source, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

/// What distinguishes one provider from another: where to ask, and how to read
/// the answer.
pub trait WeatherSource: Debug + Send + Sync + 'static {
    fn id(&self) -> ProviderId;

    fn default_base_url(&self) -> &'static str;

    fn endpoint(&self, coords: &Coordinates, api_key: &str) -> Endpoint;

    /// Validates the provider's data container and maps it into the shared
    /// record. A response without the container is `DataUnavailable`.
    fn normalize(&self, body: &str) -> Result<NormalizedObservation, WeatherError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn current(&self, coords: &Coordinates) -> Result<NormalizedObservation, WeatherError>;
}

/// One HTTP adapter, parameterized by the provider it talks to.
#[derive(Debug, Clone)]
pub struct Adapter<S> {
    source: S,
    api_key: String,
    base_url: String,
    http: Client,
}

impl<S: WeatherSource> Adapter<S> {
    pub fn new(source: S, api_key: String) -> Self {
        let base_url = source.default_base_url().to_string();
        Self {
            source,
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// Points the adapter at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl<S: WeatherSource> WeatherProvider for Adapter<S> {
    fn id(&self) -> ProviderId {
        self.source.id()
    }

    async fn current(&self, coords: &Coordinates) -> Result<NormalizedObservation, WeatherError> {
        let id = self.source.id();
        let endpoint = self.source.endpoint(coords, &self.api_key);
        let url = format!("{}{}", self.base_url, endpoint.path);

        tracing::debug!(provider = %id, %url, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&endpoint.query)
            .send()
            .await
            .map_err(|err| WeatherError::unavailable(id, format!("request failed: {err}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| WeatherError::unavailable(id, format!("failed to read body: {err}")))?;

        if !status.is_success() {
            return Err(WeatherError::unavailable(
                id,
                format!("request failed with status {status}: {}", truncate_body(&body)),
            ));
        }

        let observation = self.source.normalize(&body)?;
        tracing::debug!(provider = %id, ?observation, "normalized current conditions");
        Ok(observation)
    }
}

/// Build the adapter for `id`, taking its key from `config`.
///
/// A missing key is not an error here: the request goes out with an empty key
/// and the provider's rejection surfaces as `DataUnavailable`.
pub fn provider_from_config(id: ProviderId, config: &Config) -> Box<dyn WeatherProvider> {
    if !config.is_provider_configured(id) {
        tracing::debug!(provider = %id, "no API key configured, sending request without one");
    }
    let api_key = config.provider_api_key(id).unwrap_or_default().to_owned();

    match id {
        ProviderId::OpenWeather => Box::new(Adapter::new(OpenWeather, api_key)),
        ProviderId::WeatherApi => Box::new(Adapter::new(WeatherApi, api_key)),
        ProviderId::Tomorrow => Box::new(Adapter::new(Tomorrow, api_key)),
        ProviderId::VisualCrossing => Box::new(Adapter::new(VisualCrossing, api_key)),
    }
}

pub(crate) fn parse_json<T: DeserializeOwned>(
    id: ProviderId,
    body: &str,
) -> Result<T, WeatherError> {
    serde_json::from_str(body)
        .map_err(|err| WeatherError::unavailable(id, format!("invalid response: {err}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
