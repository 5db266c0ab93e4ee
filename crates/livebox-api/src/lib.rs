//! Async client for capability-described Livebox router APIs.
//!
//! The router advertises its features at `/API/Capabilities`; this crate
//! discovers them and checks every call against them before it leaves the
//! process:
//!
//! - **[`HttpClient`]**: live [`LiveboxClient`] built from a
//!   [`ClientConfiguration`], a [`Transport`] and a [`LoggingConfig`].
//! - **[`Router`]**: capability cache plus validation of feature id,
//!   operation, and path variables.
//! - **[`Dispatcher`]**: URL joining, Basic auth, JSON bodies, and
//!   response classification into [`Error`].
//! - **[`codec`]**: tolerant decoding helpers for inconsistent vendor JSON.
//! - **[`testing::MockClient`]**: canned in-memory client for tests.

pub mod capabilities;
pub mod client;
pub mod codec;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod router;
pub mod testing;
pub mod transport;

// ── Primary re-exports ──────────────────────────────────────────────
pub use capabilities::{CAPABILITIES_PATH, Capabilities, Feature, FeatureIndex, Operation};
pub use client::{HttpClient, LiveboxClient};
pub use config::{ClientConfiguration, DEFAULT_TIMEOUT};
pub use dispatcher::{Dispatcher, HttpMethod, JsonBody, RequestDescriptor};
pub use error::Error;
pub use logging::{HttpLogger, HttpMetrics, LogLevel, LoggingConfig, TracingLogger};
pub use router::{FeatureRequest, Router};
pub use transport::{
    HttpRequest, HttpResponse, ReqwestTransport, TlsMode, Transport, TransportConfig,
    TransportError,
};
