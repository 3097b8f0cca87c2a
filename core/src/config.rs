//! Client configuration.

use serde::Deserialize;

/// Origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://3taps.net";

/// Agent/auth id pair attached to POST requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub agent_id: String,
    pub auth_id: String,
}

/// Immutable settings a `Client` is constructed with.
///
/// Deserializable so callers can embed it in their own configuration files:
///
/// ```
/// let config: threetaps_core::ClientConfig =
///     serde_json::from_str(r#"{"agent_id":"me","auth_id":"secret"}"#).unwrap();
/// assert!(config.credentials().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub agent_id: Option<String>,
    pub auth_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            agent_id: None,
            auth_id: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_credentials(
        mut self,
        agent_id: impl Into<String>,
        auth_id: impl Into<String>,
    ) -> Self {
        self.agent_id = Some(agent_id.into());
        self.auth_id = Some(auth_id.into());
        self
    }

    /// Both ids, or nothing. A lone agent or auth id is never sent.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.agent_id, &self.auth_id) {
            (Some(agent_id), Some(auth_id)) => Some(Credentials {
                agent_id: agent_id.clone(),
                auth_id: auth_id.clone(),
            }),
            _ => None,
        }
    }
}
