// In-memory `LiveboxClient` for exercising higher layers without a router.
//
// Responses and errors are canned per feature id. Every call is recorded
// so tests can assert on what was sent.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::IntoEnumIterator;
use url::Url;

use crate::capabilities::{Capabilities, Feature, Operation};
use crate::client::LiveboxClient;
use crate::config::ClientConfiguration;
use crate::dispatcher::{HttpMethod, decode};
use crate::error::Error;
use crate::router::{FeatureRequest, Router};

type ErrorFactory = Box<dyn Fn() -> Error + Send + Sync>;

/// One call observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub feature: String,
    pub method: HttpMethod,
    pub path_vars: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

/// Capability set served by a fresh [`MockClient`].
pub fn default_mock_capabilities() -> Capabilities {
    Capabilities {
        features: vec![
            Feature::new("mock.feature.get", "/mock/feature/get", [Operation::Read]),
            Feature::new("mock.feature.post", "/mock/feature/post", [Operation::Add]),
            Feature::new("mock.feature.all", "/mock/feature/all", Operation::iter()),
        ],
    }
}

pub struct MockClient {
    config: ArcSwap<ClientConfiguration>,
    router: Router,
    mocked_capabilities: Mutex<Capabilities>,
    responses: Mutex<HashMap<String, Value>>,
    errors: Mutex<HashMap<String, ErrorFactory>>,
    requests: Mutex<Vec<RecordedRequest>>,
    discovery_succeeds: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new(ClientConfiguration::new(mock_url()))
    }
}

fn mock_url() -> Url {
    Url::parse("http://mock.url").unwrap_or_else(|_| unreachable!("static URL parses"))
}

impl MockClient {
    pub fn new(config: ClientConfiguration) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            router: Router::new(),
            mocked_capabilities: Mutex::new(default_mock_capabilities()),
            responses: Mutex::new(HashMap::new()),
            errors: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            discovery_succeeds: AtomicBool::new(true),
        }
    }

    /// Serve `response` (as JSON) for every call to `feature`.
    pub fn mock_response<T: Serialize>(&self, feature: impl Into<String>, response: &T) {
        let value = serde_json::to_value(response).unwrap_or(Value::Null);
        lock(&self.responses).insert(feature.into(), value);
    }

    /// Fail every call to `feature` with a freshly built error.
    pub fn mock_error<F>(&self, feature: impl Into<String>, error: F)
    where
        F: Fn() -> Error + Send + Sync + 'static,
    {
        lock(&self.errors).insert(feature.into(), Box::new(error));
    }

    pub fn set_capabilities(&self, capabilities: Capabilities) {
        *lock(&self.mocked_capabilities) = capabilities;
    }

    pub fn set_discovery_succeeds(&self, succeeds: bool) {
        self.discovery_succeeds.store(succeeds, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    fn record(&self, request: FeatureRequest) -> Result<String, Error> {
        let body = match request.body {
            Some(body) => Some(decode::<Value>(&body.into_bytes()?)?),
            None => None,
        };
        let feature = request.feature.clone();
        lock(&self.requests).push(RecordedRequest {
            feature: request.feature,
            method: request.method,
            path_vars: request.path_vars,
            headers: request.headers,
            body,
        });
        Ok(feature)
    }

    fn canned_error(&self, feature: &str) -> Option<Error> {
        lock(&self.errors).get(feature).map(|make| make())
    }

    fn canned_response(&self, feature: &str) -> Option<Value> {
        lock(&self.responses).get(feature).cloned()
    }
}

impl LiveboxClient for MockClient {
    fn configuration(&self) -> Arc<ClientConfiguration> {
        self.config.load_full()
    }

    fn capabilities(&self) -> Option<Arc<Capabilities>> {
        self.router.capabilities()
    }

    fn feature(&self, id: &str) -> Option<Feature> {
        self.router.feature(id)
    }

    async fn discover_capabilities(&self) -> Result<Arc<Capabilities>, Error> {
        lock(&self.requests).push(RecordedRequest {
            feature: "Capabilities".into(),
            method: HttpMethod::Get,
            path_vars: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: None,
        });
        if !self.discovery_succeeds.load(Ordering::SeqCst) {
            return Err(Error::NotImplementedInMock("Capabilities".into()));
        }
        let capabilities = lock(&self.mocked_capabilities).clone();
        Ok(self.router.install(capabilities))
    }

    async fn invoke<R>(&self, request: FeatureRequest) -> Result<R, Error>
    where
        R: DeserializeOwned + Send,
    {
        let feature = self.record(request)?;
        if let Some(error) = self.canned_error(&feature) {
            return Err(error);
        }
        let value = self
            .canned_response(&feature)
            .ok_or(Error::FeatureNotFound(feature))?;
        serde_json::from_value(value.clone()).map_err(|e| Error::Decoding {
            message: e.to_string(),
            body: value.to_string(),
        })
    }

    async fn invoke_void(&self, request: FeatureRequest) -> Result<(), Error> {
        let feature = self.record(request)?;
        if let Some(error) = self.canned_error(&feature) {
            return Err(error);
        }
        match self.canned_response(&feature) {
            Some(_) => Ok(()),
            None => Err(Error::FeatureNotFound(feature)),
        }
    }

    fn update_base_url(&self, base_url: Url, clear_cache: bool) {
        self.config.rcu(|current| current.with_base_url(base_url.clone()));
        if clear_cache {
            self.router.clear();
        }
    }

    fn update_credentials(&self, username: Option<String>, password: Option<SecretString>) {
        self.config
            .rcu(|current| current.with_credentials(username.clone(), password.clone()));
    }
}
