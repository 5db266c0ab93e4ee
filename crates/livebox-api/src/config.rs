// Immutable per-client connection settings.
//
// A `ClientConfiguration` is never edited in place: credential and
// base-URL changes build a new value that the client swaps in whole.

use std::collections::BTreeMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ClientConfiguration {
    pub base_url: Url,
    pub timeout: Duration,
    pub default_headers: BTreeMap<String, String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl ClientConfiguration {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            default_headers: BTreeMap::new(),
            username: None,
            password: None,
        }
    }

    /// Parse `base_url` and build a configuration with defaults.
    pub fn parse(base_url: &str) -> Result<Self, Error> {
        let url = Url::parse(base_url).map_err(|_| Error::InvalidUrl(base_url.to_owned()))?;
        Ok(Self::new(url))
    }

    pub fn with_base_url(&self, base_url: Url) -> Self {
        Self {
            base_url,
            ..self.clone()
        }
    }

    pub fn with_credentials(&self, username: Option<String>, password: Option<SecretString>) -> Self {
        Self {
            username,
            password,
            ..self.clone()
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// `user:password` when both halves are set.
    pub(crate) fn basic_credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{user}:{}", pass.expose_secret())),
            _ => None,
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}
