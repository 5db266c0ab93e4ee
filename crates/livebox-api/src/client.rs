// Router client: the trait higher layers program against, and the live
// HTTP implementation.
//
// Configuration and capability cache are each swapped atomically as whole
// values; concurrent calls never observe a half-updated client.

use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwap;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::capabilities::{CAPABILITIES_PATH, Capabilities, Feature, Operation};
use crate::config::ClientConfiguration;
use crate::dispatcher::{Dispatcher, RequestDescriptor};
use crate::error::Error;
use crate::logging::LoggingConfig;
use crate::router::{FeatureRequest, Router};
use crate::transport::{ReqwestTransport, Transport, TransportConfig};

/// Operations every router client offers.
pub trait LiveboxClient: Send + Sync {
    /// Snapshot of the current configuration.
    fn configuration(&self) -> Arc<ClientConfiguration>;

    /// The last successfully discovered capability set, if any.
    fn capabilities(&self) -> Option<Arc<Capabilities>>;

    fn feature(&self, id: &str) -> Option<Feature>;

    fn supports(&self, id: &str, operation: Operation) -> bool {
        self.feature(id).is_some_and(|f| f.supports(operation))
    }

    /// Fetch the capability document and replace the cache on success.
    fn discover_capabilities(
        &self,
    ) -> impl Future<Output = Result<Arc<Capabilities>, Error>> + Send;

    /// Validate, route and send `request`, decoding the body as `R`.
    fn invoke<R>(&self, request: FeatureRequest) -> impl Future<Output = Result<R, Error>> + Send
    where
        R: DeserializeOwned + Send;

    /// Like [`LiveboxClient::invoke`] for calls whose body is ignored.
    fn invoke_void(&self, request: FeatureRequest) -> impl Future<Output = Result<(), Error>> + Send;

    /// Point the client at another router, optionally dropping the cache.
    fn update_base_url(&self, base_url: Url, clear_cache: bool);

    /// Replace the credentials; the capability cache is kept.
    fn update_credentials(&self, username: Option<String>, password: Option<SecretString>);
}

// ── HTTP client ─────────────────────────────────────────────────────

/// Live client talking to a router over HTTP.
pub struct HttpClient<T = ReqwestTransport> {
    config: ArcSwap<ClientConfiguration>,
    router: Router,
    dispatcher: Dispatcher<T>,
}

impl HttpClient {
    /// Client with the default reqwest transport and tracing logger.
    pub fn new(config: ClientConfiguration) -> Result<Self, Error> {
        Self::with_transport_config(config, &TransportConfig::default(), LoggingConfig::default())
    }

    pub fn with_transport_config(
        config: ClientConfiguration,
        transport: &TransportConfig,
        logging: LoggingConfig,
    ) -> Result<Self, Error> {
        let transport = ReqwestTransport::new(transport)?;
        Ok(Self::with_transport(config, transport, logging))
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn with_transport(config: ClientConfiguration, transport: T, logging: LoggingConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            router: Router::new(),
            dispatcher: Dispatcher::new(transport, logging),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }

    /// Send a raw request relative to the base URL, bypassing validation.
    pub async fn request<R: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<R, Error> {
        let config = self.config.load_full();
        self.dispatcher.dispatch(&config, request).await
    }
}

impl<T: Transport> LiveboxClient for HttpClient<T> {
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
        let config = self.config.load_full();
        let capabilities: Capabilities = self
            .dispatcher
            .dispatch(&config, RequestDescriptor::get(CAPABILITIES_PATH))
            .await?;
        info!(features = capabilities.len(), "discovered router capabilities");
        Ok(self.router.install(capabilities))
    }

    async fn invoke<R>(&self, request: FeatureRequest) -> Result<R, Error>
    where
        R: DeserializeOwned + Send,
    {
        let descriptor = self.router.route(request)?;
        let config = self.config.load_full();
        self.dispatcher.dispatch(&config, descriptor).await
    }

    async fn invoke_void(&self, request: FeatureRequest) -> Result<(), Error> {
        let descriptor = self.router.route(request)?;
        let config = self.config.load_full();
        self.dispatcher.dispatch_void(&config, descriptor).await
    }

    fn update_base_url(&self, base_url: Url, clear_cache: bool) {
        debug!(%base_url, clear_cache, "updating base URL");
        self.config.rcu(|current| current.with_base_url(base_url.clone()));
        if clear_cache {
            self.router.clear();
        }
    }

    fn update_credentials(&self, username: Option<String>, password: Option<SecretString>) {
        debug!(username = ?username, "updating credentials");
        self.config
            .rcu(|current| current.with_credentials(username.clone(), password.clone()));
    }
}
