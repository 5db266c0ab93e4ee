//! Shared configuration for Livebox tools.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to `livebox_api::ClientConfiguration` / `TransportConfig`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use livebox_api::{ClientConfiguration, DEFAULT_TIMEOUT, TlsMode, TransportConfig};
use livebox_core::DEFAULT_USERNAME;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of environment variables merged over the config file.
pub const ENV_PREFIX: &str = "LIVEBOX_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{0}' not found")]
    UnknownProfile(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named explicitly.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named router profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            insecure: false,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// A named router profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Router base URL (e.g., "http://192.168.1.1").
    pub url: String,

    /// Defaults to `UsrAdmin` when a password is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Plaintext password (prefer `password_env`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable name containing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Override timeout, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Extra headers sent with every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "livebox").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("livebox");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` (missing file is fine) with `LIVEBOX_` overrides.
///
/// Nested keys use a double underscore:
/// `LIVEBOX_PROFILES__HOME__URL=http://192.168.1.1`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

impl Config {
    /// Pick `name`, else the configured default profile.
    pub fn profile<'a>(&'a self, name: Option<&'a str>) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get(name)
            .map(|profile| (name, profile))
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_owned()))
    }
}

/// Resolve the password from the credential chain: the profile's
/// `password_env` variable, then the plaintext `password`.
pub fn resolve_password(profile: &Profile) -> Option<SecretString> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }
    profile.password.clone().map(SecretString::from)
}

/// Build a `ClientConfiguration` from a profile and the global defaults.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfiguration, ConfigError> {
    let url: url::Url = profile.url.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", profile.url),
    })?;

    let password = resolve_password(profile);
    let username = match (&profile.username, &password) {
        (Some(username), _) => Some(username.clone()),
        (None, Some(_)) => Some(DEFAULT_USERNAME.to_owned()),
        (None, None) => None,
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    let config = profile.headers.iter().fold(
        ClientConfiguration::new(url).with_timeout(timeout),
        |config, (name, value)| config.with_header(name, value),
    );
    Ok(config.with_credentials(username, password))
}

/// TLS and connect settings for a profile.
pub fn profile_to_transport_config(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    TransportConfig {
        tls,
        connect_timeout: timeout,
        ..TransportConfig::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "home"

[defaults]
timeout = 20

[profiles.home]
url = "http://192.168.1.1"
password = "plain"
password_env = "LIVEBOX_CONFIG_TEST_SURELY_UNSET"

[profiles.home.headers]
X-Client = "livebox-cli"

[profiles.lab]
url = "https://10.0.0.1"
username = "admin"
timeout = 5
insecure = true
"#;

    fn sample() -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        load_config_from(&path).unwrap()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.defaults.timeout, 60);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn default_profile_is_used_when_unnamed() {
        let config = sample();
        let (name, profile) = config.profile(None).unwrap();
        assert_eq!(name, "home");
        assert_eq!(profile.url, "http://192.168.1.1");
        assert!(matches!(config.profile(Some("nope")), Err(ConfigError::UnknownProfile(n)) if n == "nope"));
    }

    #[test]
    fn password_falls_back_to_plaintext_and_defaults_username() {
        let config = sample();
        let (_, home) = config.profile(Some("home")).unwrap();

        let client = profile_to_client_config(home, &config.defaults).unwrap();
        assert_eq!(client.username.as_deref(), Some(DEFAULT_USERNAME));
        assert_eq!(client.password.as_ref().unwrap().expose_secret(), "plain");
        assert_eq!(client.timeout, Duration::from_secs(20));
        assert_eq!(client.default_headers.get("X-Client").map(String::as_str), Some("livebox-cli"));
    }

    #[test]
    fn profile_overrides_timeout_and_tls() {
        let config = sample();
        let (_, lab) = config.profile(Some("lab")).unwrap();

        let client = profile_to_client_config(lab, &config.defaults).unwrap();
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.username.as_deref(), Some("admin"));
        assert!(client.password.is_none());

        let transport = profile_to_transport_config(lab, &config.defaults);
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let profile = Profile {
            url: "not a url".into(),
            ..Profile::default()
        };
        let err = profile_to_client_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "url"));
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let original = sample();

        save_config_to(&original, &path).unwrap();
        let reloaded = load_config_from(&path).unwrap();

        assert_eq!(reloaded, original);
    }
}
