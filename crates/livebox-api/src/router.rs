// Feature-aware request routing.
//
// Owns the discovered capability cache and turns a `FeatureRequest`
// (feature id + method + path variables) into a concrete
// `RequestDescriptor`, rejecting anything the router did not advertise.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::Serialize;
use tracing::trace;

use crate::capabilities::{Capabilities, CapabilityCache, Feature, Operation};
use crate::dispatcher::{HttpMethod, JsonBody, RequestDescriptor};
use crate::error::Error;

// ── Feature request ─────────────────────────────────────────────────

/// A call addressed to a feature id rather than a path.
#[derive(Debug)]
pub struct FeatureRequest {
    pub feature: String,
    pub method: HttpMethod,
    pub path_vars: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<JsonBody>,
}

impl FeatureRequest {
    pub fn new(feature: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            feature: feature.into(),
            method,
            path_vars: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(feature: impl Into<String>) -> Self {
        Self::new(feature, HttpMethod::Get)
    }

    pub fn put(feature: impl Into<String>) -> Self {
        Self::new(feature, HttpMethod::Put)
    }

    pub fn post(feature: impl Into<String>) -> Self {
        Self::new(feature, HttpMethod::Post)
    }

    pub fn delete(feature: impl Into<String>) -> Self {
        Self::new(feature, HttpMethod::Delete)
    }

    pub fn path_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_vars.insert(name.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(JsonBody::encode(body));
        self
    }

    /// The operation this request needs the feature to advertise.
    pub fn required_operation(&self) -> Operation {
        required_operation(self.method, !self.path_vars.is_empty())
    }

    fn into_descriptor(self, path: String) -> RequestDescriptor {
        RequestDescriptor {
            path,
            method: self.method,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Map an HTTP method to the operation it exercises.
///
/// POST means Invoke on a bare feature and Add when path variables are
/// supplied; routers key both on the same method.
pub fn required_operation(method: HttpMethod, has_path_vars: bool) -> Operation {
    match method {
        HttpMethod::Get | HttpMethod::Head => Operation::Read,
        HttpMethod::Put | HttpMethod::Patch => Operation::Write,
        HttpMethod::Delete => Operation::Delete,
        HttpMethod::Post if has_path_vars => Operation::Add,
        HttpMethod::Post => Operation::Invoke,
    }
}

/// Check `request` against `feature` and build the concrete path.
pub fn resolve_path(feature: &Feature, request: &FeatureRequest) -> Result<String, Error> {
    let operation = request.required_operation();
    if !feature.supports(operation) {
        return Err(Error::OperationNotSupported {
            feature: feature.id.clone(),
            operation,
        });
    }

    let required = feature.path_variable_names();
    let expected: BTreeSet<&str> = required.iter().map(String::as_str).collect();
    let supplied: BTreeSet<&str> = request.path_vars.keys().map(String::as_str).collect();
    if expected != supplied {
        return Err(Error::InvalidPathVariables {
            feature: feature.id.clone(),
            required,
            provided: request.path_vars.clone(),
        });
    }

    Ok(feature.path(&request.path_vars))
}

// ── Router ──────────────────────────────────────────────────────────

/// Capability cache plus validation.
///
/// Starts empty; every request fails with `FeatureNotFound` until a
/// capability set is installed.
#[derive(Debug, Default)]
pub struct Router {
    cache: ArcSwapOption<CapabilityCache>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache wholesale with a freshly discovered set.
    pub fn install(&self, capabilities: Capabilities) -> Arc<Capabilities> {
        let cache = CapabilityCache::from(capabilities);
        let installed = Arc::clone(&cache.capabilities);
        trace!(features = cache.index.len(), "installing capability cache");
        self.cache.store(Some(Arc::new(cache)));
        installed
    }

    pub fn clear(&self) {
        trace!("clearing capability cache");
        self.cache.store(None);
    }

    pub fn is_ready(&self) -> bool {
        self.cache.load().is_some()
    }

    pub fn capabilities(&self) -> Option<Arc<Capabilities>> {
        self.cache
            .load()
            .as_ref()
            .map(|cache| Arc::clone(&cache.capabilities))
    }

    pub fn feature(&self, id: &str) -> Option<Feature> {
        self.cache
            .load()
            .as_ref()
            .and_then(|cache| cache.index.get(id).cloned())
    }

    /// `true` if `id` is known and advertises `operation`.
    pub fn supports(&self, id: &str, operation: Operation) -> bool {
        self.feature(id).is_some_and(|f| f.supports(operation))
    }

    /// Validate `request` and turn it into a dispatchable descriptor.
    pub fn route(&self, request: FeatureRequest) -> Result<RequestDescriptor, Error> {
        let guard = self.cache.load();
        let feature = guard
            .as_ref()
            .and_then(|cache| cache.index.get(&request.feature))
            .ok_or_else(|| Error::FeatureNotFound(request.feature.clone()))?;

        let path = resolve_path(feature, &request)?;
        Ok(request.into_descriptor(path))
    }
}
