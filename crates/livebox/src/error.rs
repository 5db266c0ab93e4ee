//! CLI error types with miette diagnostics.
//!
//! Maps client and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use livebox_api::{Error as ApiError, TransportError};
use livebox_config::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the router: {reason}")]
    #[diagnostic(
        code(livebox::connection_failed),
        help(
            "Check that the router is reachable from this machine.\n\
             Try: livebox --url http://192.168.1.1 info"
        )
    )]
    ConnectionFailed { reason: String },

    #[error("TLS failure: {reason}")]
    #[diagnostic(
        code(livebox::tls_error),
        help("Use --insecure (-k) to accept a self-signed certificate, or set ca_cert in your profile.")
    )]
    TlsError { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(livebox::timeout),
        help("Increase the timeout with --timeout or check the router's responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(livebox::auth_failed),
        help(
            "Verify the administration password.\n\
             Pass --password, set LIVEBOX_PASSWORD, or set password_env in your profile."
        )
    )]
    AuthFailed,

    #[error("No password configured")]
    #[diagnostic(
        code(livebox::no_credentials),
        help("Pass --password, set LIVEBOX_PASSWORD, or set password_env in your profile.")
    )]
    NoCredentials,

    // ── Router features ──────────────────────────────────────────────
    #[error("The router does not advertise feature '{feature}'")]
    #[diagnostic(
        code(livebox::unsupported),
        help("Run: livebox capabilities to see what this router exposes")
    )]
    Unsupported { feature: String },

    #[error("{message}")]
    #[diagnostic(code(livebox::invalid_request))]
    InvalidRequest { message: String },

    // ── Router responses ─────────────────────────────────────────────
    #[error("Router answered HTTP {status}{}", .body.as_deref().map(|b| format!(": {b}")).unwrap_or_default())]
    #[diagnostic(code(livebox::http))]
    Http { status: u16, body: Option<String> },

    #[error(transparent)]
    #[diagnostic(code(livebox::api))]
    Api(ApiError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(livebox::validation))]
    Validation { field: String, reason: String },

    #[error("Reboot requires confirmation")]
    #[diagnostic(
        code(livebox::confirmation_required),
        help("Pass --yes (-y) to reboot the router.")
    )]
    ConfirmationRequired,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(livebox::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: livebox config init --router-url <URL>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No router configured")]
    #[diagnostic(
        code(livebox::no_config),
        help(
            "Pass --url, or create a profile with: livebox config init --router-url <URL>\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(livebox::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(livebox::json), help("Check the JSON payload and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed | Self::NoCredentials => exit_code::AUTH,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Http { status: 404, .. } => exit_code::NOT_FOUND,
            Self::InvalidRequest { .. } | Self::Validation { .. } | Self::ConfirmationRequired => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── Error → CliError mapping ─────────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(TransportError::Timeout) => Self::Timeout,
            ApiError::Network(TransportError::Tls(reason)) => Self::TlsError { reason },
            ApiError::Network(e) => Self::ConnectionFailed {
                reason: e.to_string(),
            },
            ApiError::AuthenticationRequired => Self::AuthFailed,
            ApiError::FeatureNotFound(feature) | ApiError::NotImplementedInMock(feature) => {
                Self::Unsupported { feature }
            }
            ApiError::OperationNotSupported { .. } | ApiError::InvalidPathVariables { .. } => {
                Self::InvalidRequest {
                    message: err.to_string(),
                }
            }
            ApiError::Http { status, .. } => Self::Http {
                status,
                body: err.body_text().filter(|b| !b.trim().is_empty()),
            },
            other => Self::Api(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn transport_failures_map_to_connection_codes() {
        let timeout = CliError::from(ApiError::Network(TransportError::Timeout));
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let refused = CliError::from(ApiError::Network(TransportError::Connect("refused".into())));
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn local_validation_maps_to_usage_or_unsupported() {
        let missing = CliError::from(ApiError::FeatureNotFound("Wifi".into()));
        assert!(matches!(missing, CliError::Unsupported { ref feature } if feature == "Wifi"));
        assert_eq!(missing.exit_code(), exit_code::UNSUPPORTED);

        assert_eq!(CliError::from(ApiError::AuthenticationRequired).exit_code(), exit_code::AUTH);
    }

    #[test]
    fn http_error_keeps_body_text() {
        let err = CliError::from(ApiError::Http {
            status: 404,
            body: Some(Bytes::from_static(b"no such interface")),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "Router answered HTTP 404: no such interface");
    }
}
