use thiserror::Error;

use crate::provider::ProviderId;

/// Failure of a provider adapter.
///
/// Transport errors, rejected credentials, non-success statuses and responses
/// without the expected data container all end up here; callers cannot tell
/// them apart.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("{} data unavailable: {reason}", .provider.display_name())]
    DataUnavailable { provider: ProviderId, reason: String },
}

impl WeatherError {
    pub fn unavailable(provider: ProviderId, reason: impl Into<String>) -> Self {
        Self::DataUnavailable { provider, reason: reason.into() }
    }

    pub fn provider(&self) -> ProviderId {
        match self {
            Self::DataUnavailable { provider, .. } => *provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_prefixed_with_provider_name() {
        let err = WeatherError::unavailable(ProviderId::Tomorrow, "missing `data.values`");
        assert_eq!(err.to_string(), "Tomorrow.io data unavailable: missing `data.values`");
        assert_eq!(err.provider(), ProviderId::Tomorrow);
    }
}
