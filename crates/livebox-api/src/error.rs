use std::collections::BTreeMap;

use bytes::Bytes;
use thiserror::Error;

use crate::capabilities::Operation;
use crate::transport::TransportError;

/// Top-level error type for the `livebox-api` crate.
///
/// Covers every failure mode of a router call: request construction,
/// capability validation, transport, and response classification.
/// Validation failures are raised before any network I/O; see
/// [`Error::is_local`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Request construction ────────────────────────────────────────
    /// Base URL joined with the request path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A default or per-call header had an invalid name or value.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    // ── Capability validation ───────────────────────────────────────
    /// The feature id is not in the discovered capability set.
    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    /// The feature exists but does not advertise the operation implied
    /// by the HTTP method.
    #[error("Operation {operation} not supported by feature {feature}")]
    OperationNotSupported { feature: String, operation: Operation },

    /// Supplied path variables differ from the URI template's variables.
    #[error(
        "Invalid path variables for feature {feature}: required [{}], provided [{}]",
        .required.join(", "),
        joined_keys(.provided)
    )]
    InvalidPathVariables {
        feature: String,
        required: Vec<String>,
        provided: BTreeMap<String, String>,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// Connection refused, DNS failure, timeout, TLS failure, etc.
    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    /// The transport returned something that is not a usable HTTP response.
    #[error("Unexpected response from router")]
    UnexpectedResponse,

    // ── HTTP ────────────────────────────────────────────────────────
    /// The router rejected the credentials (HTTP 401).
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Any other non-2xx status, with the raw body when one was sent.
    #[error("HTTP error {status}")]
    Http { status: u16, body: Option<Bytes> },

    /// A 2xx response with an empty body where a payload was expected.
    #[error("No data received")]
    NoData,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Decoding error: {message}")]
    Decoding { message: String, body: String },

    // ── Testing ─────────────────────────────────────────────────────
    /// The mock client has no canned response for this call.
    #[error("Not implemented in mock: {0}")]
    NotImplementedInMock(String),
}

fn joined_keys(map: &BTreeMap<String, String>) -> String {
    map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

impl Error {
    /// Returns `true` if the error was raised locally, before any
    /// request reached the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_)
                | Self::InvalidHeader(_)
                | Self::Encoding(_)
                | Self::FeatureNotFound(_)
                | Self::OperationNotSupported { .. }
                | Self::InvalidPathVariables { .. }
        )
    }

    /// Returns `true` if supplying (other) credentials might resolve it.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthenticationRequired)
    }

    /// Returns `true` if this is a "not found" error, local or remote.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FeatureNotFound(_) | Self::Http { status: 404, .. }
        )
    }

    /// HTTP status carried by the error, if the router answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationRequired => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of an HTTP error, decoded lossily as UTF-8.
    pub fn body_text(&self) -> Option<String> {
        match self {
            Self::Http {
                body: Some(body), ..
            } => Some(String::from_utf8_lossy(body).into_owned()),
            Self::Decoding { body, .. } => Some(body.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn invalid_path_variables_message_lists_both_sides() {
        let err = Error::InvalidPathVariables {
            feature: "WlanAccessPoint".into(),
            required: vec!["wlan_ifc".into(), "wlan_ap".into()],
            provided: BTreeMap::from([("wlan_ifc".into(), "wl0".into())]),
        };
        assert_eq!(
            err.to_string(),
            "Invalid path variables for feature WlanAccessPoint: \
             required [wlan_ifc, wlan_ap], provided [wlan_ifc]"
        );
        assert!(err.is_local());
    }

    #[test]
    fn http_error_exposes_status_and_body() {
        let err = Error::Http {
            status: 500,
            body: Some(Bytes::from_static(b"oops")),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body_text().as_deref(), Some("oops"));
        assert!(!err.is_local());
    }

    #[test]
    fn auth_required_maps_to_401() {
        assert!(Error::AuthenticationRequired.is_auth_required());
        assert_eq!(Error::AuthenticationRequired.status(), Some(401));
    }
}
