// Request dispatcher: configuration + request descriptor -> HTTP -> typed
// result.
//
// Everything that can fail locally (URL, headers, body encoding) fails
// before the transport is touched. Responses are classified in a fixed
// order: transport failure, non-HTTP status, 401, other non-2xx, empty
// body, undecodable body.

use std::collections::BTreeMap;
use std::time::Instant;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::Display;
use tracing::debug;
use url::Url;

use crate::config::ClientConfiguration;
use crate::error::Error;
use crate::logging::{HttpMetrics, LoggingConfig};
use crate::transport::{HttpRequest, HttpResponse, Transport};

const APPLICATION_JSON: &str = "application/json";

// ── Request descriptor ──────────────────────────────────────────────

/// HTTP methods the router API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Head => Self::HEAD,
        }
    }
}

/// A JSON request body, serialized when attached.
///
/// A serialization failure is kept and reported as [`Error::Encoding`]
/// when the request is dispatched, before any I/O.
#[derive(Debug)]
pub struct JsonBody(Result<Bytes, serde_json::Error>);

impl JsonBody {
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Self {
        Self(serde_json::to_vec(value).map(Bytes::from))
    }

    pub(crate) fn into_bytes(self) -> Result<Bytes, Error> {
        self.0.map_err(Error::Encoding)
    }
}

/// Everything needed to issue one call, relative to the base URL.
#[derive(Debug)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<JsonBody>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(JsonBody::encode(body));
        self
    }
}

// ── URL & headers ───────────────────────────────────────────────────

/// Append `path` to the base URL's path.
///
/// Doubled slashes introduced by the concatenation are collapsed, so
/// `http://host/` + `/API/x` gives `http://host/API/x`.
pub fn join_url(base: &Url, path: &str) -> Result<Url, Error> {
    if base.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!("{base}{path}")));
    }
    let suffix = format!("/{path}").replace("//", "/");
    let joined = format!("{}{suffix}", base.path().trim_end_matches('/'));

    let mut url = base.clone();
    url.set_path(&joined);
    Ok(url)
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), Error> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| Error::InvalidHeader(name.to_owned()))?;
    let value =
        HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(name.to_string()))?;
    headers.insert(name, value);
    Ok(())
}

/// Headers in increasing precedence: configuration defaults, the forced
/// `Accept`, Basic credentials, per-call headers, then the body's
/// `Content-Type`.
fn build_headers(
    config: &ClientConfiguration,
    request: &RequestDescriptor,
) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.default_headers {
        insert_header(&mut headers, name, value)?;
    }

    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

    if let Some(credentials) = config.basic_credentials() {
        let encoded = STANDARD.encode(credentials.as_bytes());
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|_| Error::InvalidHeader(AUTHORIZATION.to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    for (name, value) in &request.headers {
        insert_header(&mut headers, name, value)?;
    }

    if request.body.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }
    Ok(headers)
}

/// Turn a descriptor into a concrete request. Pure; performs no I/O.
pub fn build_request(
    config: &ClientConfiguration,
    request: RequestDescriptor,
) -> Result<HttpRequest, Error> {
    let url = join_url(&config.base_url, &request.path)?;
    let headers = build_headers(config, &request)?;
    let body = request.body.map(JsonBody::into_bytes).transpose()?;

    Ok(HttpRequest {
        method: request.method.into(),
        url,
        headers,
        body,
        timeout: config.timeout,
    })
}

// ── Response classification ─────────────────────────────────────────

/// Classify a response that made it back from the transport.
fn classify(response: HttpResponse) -> Result<Bytes, Error> {
    match response.status {
        status if !(100..=599).contains(&status) => Err(Error::UnexpectedResponse),
        401 => Err(Error::AuthenticationRequired),
        200..=299 => Ok(response.body),
        status => {
            let body = (!response.body.is_empty()).then_some(response.body);
            Err(Error::Http { status, body })
        }
    }
}

/// Decode a 2xx body, keeping the raw text on failure.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    if body.is_empty() {
        return Err(Error::NoData);
    }
    serde_json::from_slice(body).map_err(|e| {
        let text = String::from_utf8_lossy(body).into_owned();
        let preview: String = text.chars().take(200).collect();
        Error::Decoding {
            message: format!("{e} (body preview: {preview:?})"),
            body: text,
        }
    })
}

// ── Dispatcher ──────────────────────────────────────────────────────

/// Issues requests through a [`Transport`] and classifies the results.
#[derive(Debug)]
pub struct Dispatcher<T> {
    transport: T,
    logging: LoggingConfig,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, logging: LoggingConfig) -> Self {
        Self { transport, logging }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` and decode the JSON response body as `R`.
    pub async fn dispatch<R: DeserializeOwned>(
        &self,
        config: &ClientConfiguration,
        request: RequestDescriptor,
    ) -> Result<R, Error> {
        let body = self.execute(config, request).await?;
        decode(&body)
    }

    /// Send `request`, accepting any 2xx body.
    pub async fn dispatch_void(
        &self,
        config: &ClientConfiguration,
        request: RequestDescriptor,
    ) -> Result<(), Error> {
        self.execute(config, request).await.map(|_| ())
    }

    async fn execute(
        &self,
        config: &ClientConfiguration,
        request: RequestDescriptor,
    ) -> Result<Bytes, Error> {
        let request = build_request(config, request)?;
        let url = request.url.clone();
        let request_body_size = request.body.as_ref().map_or(0, Bytes::len);

        debug!("{} {url}", request.method);
        self.logging.request(&request);

        let started = Instant::now();
        let outcome = self.transport.send(request).await;

        let metrics = HttpMetrics {
            duration: started.elapsed(),
            status: outcome.as_ref().ok().map(|r| r.status),
            request_body_size,
            response_body_size: outcome.as_ref().map_or(0, |r| r.body.len()),
            had_error: outcome.is_err(),
        };
        self.logging.response(&url, outcome.as_ref(), &metrics);

        classify(outcome?)
    }
}
