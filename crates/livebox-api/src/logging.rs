// HTTP request/response logging hooks.
//
// Loggers are observational only: they see every outgoing request and
// every completed exchange, but cannot alter either. Logging settings are
// passed into each client explicitly through `LoggingConfig`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use tracing::{debug, error, info};
use url::Url;

use crate::transport::{HttpRequest, HttpResponse, TransportError};

/// Bodies at least this large are summarized by size only.
pub const BODY_PREVIEW_LIMIT: usize = 1024;

const REDACTED: &str = "***MASKED***";
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
];

// ── Levels & metrics ────────────────────────────────────────────────

/// Severity of a log record, ordered least to most important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Notice,
    Error,
    Fault,
}

impl LogLevel {
    /// Level for a completed exchange.
    pub fn for_outcome(outcome: Result<u16, &TransportError>) -> Self {
        match outcome {
            Err(_) => Self::Error,
            Ok(200..=299) => Self::Info,
            Ok(400..=499) => Self::Error,
            Ok(500..=599) => Self::Fault,
            Ok(_) => Self::Notice,
        }
    }
}

/// Timing and size figures for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMetrics {
    pub duration: Duration,
    pub status: Option<u16>,
    pub request_body_size: usize,
    pub response_body_size: usize,
    pub had_error: bool,
}

/// Either the response or the transport failure that replaced it.
pub type Outcome<'a> = Result<&'a HttpResponse, &'a TransportError>;

// ── Logger trait ────────────────────────────────────────────────────

/// Receives request and response records from the dispatcher.
pub trait HttpLogger: Send + Sync + fmt::Debug {
    fn log_request(&self, request: &HttpRequest, level: LogLevel);

    fn log_response(&self, url: &Url, outcome: Outcome<'_>, level: LogLevel, metrics: &HttpMetrics);

    fn log_metrics(&self, _metrics: &HttpMetrics, _level: LogLevel) {}
}

/// Header names and values with credentials masked.
pub fn sanitize_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                REDACTED.to_owned()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            (name.as_str().to_owned(), shown)
        })
        .collect()
}

/// UTF-8 text of a small body, `None` for large or binary ones.
pub fn body_preview(body: &[u8]) -> Option<&str> {
    if body.len() < BODY_PREVIEW_LIMIT {
        std::str::from_utf8(body).ok()
    } else {
        None
    }
}

// ── tracing logger ──────────────────────────────────────────────────

/// Default logger: emits `tracing` events under the `livebox_api::http`
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

macro_rules! emit {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            LogLevel::Debug => debug!(target: "livebox_api::http", $($arg)+),
            LogLevel::Info | LogLevel::Notice => info!(target: "livebox_api::http", $($arg)+),
            LogLevel::Error => error!(target: "livebox_api::http", $($arg)+),
            LogLevel::Fault => error!(target: "livebox_api::http", fault = true, $($arg)+),
        }
    };
}

impl HttpLogger for TracingLogger {
    fn log_request(&self, request: &HttpRequest, level: LogLevel) {
        let headers = sanitize_headers(&request.headers);
        let body_size = request.body.as_ref().map_or(0, bytes::Bytes::len);
        let body = request.body.as_deref().and_then(body_preview).unwrap_or("");
        emit!(
            level,
            method = %request.method,
            url = %request.url,
            ?headers,
            body_size,
            body,
            "HTTP request"
        );
    }

    fn log_response(&self, url: &Url, outcome: Outcome<'_>, level: LogLevel, metrics: &HttpMetrics) {
        match outcome {
            Err(e) => emit!(level, %url, error = %e, "HTTP error"),
            Ok(resp) => {
                let body = body_preview(&resp.body).unwrap_or("");
                emit!(
                    level,
                    %url,
                    status = resp.status,
                    duration_ms = millis(metrics.duration),
                    response_size = resp.body.len(),
                    body,
                    "HTTP response"
                );
            }
        }
    }

    fn log_metrics(&self, metrics: &HttpMetrics, level: LogLevel) {
        emit!(
            level,
            duration_ms = millis(metrics.duration),
            status = ?metrics.status,
            request_size = metrics.request_body_size,
            response_size = metrics.response_body_size,
            had_error = metrics.had_error,
            "HTTP metrics"
        );
    }
}

// ── Configuration ───────────────────────────────────────────────────

/// Logging settings owned by one client.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub minimum_level: LogLevel,
    pub log_metrics: bool,
    pub logger: Arc<dyn HttpLogger>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            minimum_level: LogLevel::Debug,
            log_metrics: true,
            logger: Arc::new(TracingLogger),
        }
    }
}

impl LoggingConfig {
    /// No records at all.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_logger(logger: Arc<dyn HttpLogger>) -> Self {
        Self {
            logger,
            ..Self::default()
        }
    }

    pub fn with_minimum_level(self, minimum_level: LogLevel) -> Self {
        Self {
            minimum_level,
            ..self
        }
    }

    pub fn with_metrics(self, log_metrics: bool) -> Self {
        Self { log_metrics, ..self }
    }

    fn should_log(&self, level: LogLevel) -> bool {
        self.enabled && level >= self.minimum_level
    }

    pub(crate) fn request(&self, request: &HttpRequest) {
        if self.should_log(LogLevel::Info) {
            self.logger.log_request(request, LogLevel::Info);
        }
    }

    pub(crate) fn response(&self, url: &Url, outcome: Outcome<'_>, metrics: &HttpMetrics) {
        let level = LogLevel::for_outcome(outcome.map(|r| r.status));
        if self.should_log(level) {
            self.logger.log_response(url, outcome, level, metrics);
        }
        if self.log_metrics && self.should_log(LogLevel::Debug) {
            self.logger.log_metrics(metrics, LogLevel::Debug);
        }
    }
}
