//! Composition layer: builds a [`Handler`] from a provider key and a logger key.

mod config;

pub use config::{
    AUTH_ENDPOINT_KEY, DB_URI_KEY, ENDPOINT_KEY, LOGIN_KEY, LoggerKind, Overrides, PASSWORD_KEY,
    ProviderKind, SENDER_KEY,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use config::HandlerSettings;

use crate::domain::UserData;
use crate::error::{ConfigError, SmsGateError};
use crate::logger::{RecordLogger, ResultLogger, TextLogger, default_store_path};
use crate::provider::{GatewayProvider, SmsTrafficProvider, SmscProvider};
use crate::transport::{HttpTransport, ReqwestTransport};

/// One gateway provider composed with one result logger.
///
/// Build it once per sender configuration with [`HandlerFactory::create`] and
/// reuse it for every message.
pub struct Handler {
    provider_kind: ProviderKind,
    logger_kind: Option<LoggerKind>,
    provider: Box<dyn GatewayProvider>,
    records: Option<Arc<RecordLogger>>,
}

impl Handler {
    /// Send one message and record its outcome.
    ///
    /// Delivery failures are recorded, not returned. Errors:
    /// - [`SmsGateError::Validation`] when the gateway answered with an outcome
    ///   the logger cannot accept,
    /// - [`SmsGateError::Storage`] when the result store cannot be written,
    /// - [`SmsGateError::Parse`] when a successful response cannot be decoded.
    pub async fn send(&self, user_data: &UserData) -> Result<(), SmsGateError> {
        self.provider.send(user_data).await
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider_kind
    }

    /// `None` when the handler was built around a caller-supplied logger.
    pub fn logger_kind(&self) -> Option<LoggerKind> {
        self.logger_kind
    }

    /// The result store, when the `record` logger is in use.
    pub fn records(&self) -> Option<&RecordLogger> {
        self.records.as_deref()
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("provider_kind", &self.provider_kind)
            .field("logger_kind", &self.logger_kind)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
/// Builder for [`HandlerFactory`].
///
/// Use this when you need a request timeout, a custom user-agent or another
/// default result store.
pub struct HandlerFactoryBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_store: Option<PathBuf>,
}

impl HandlerFactoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an HTTP client timeout applied to every request of every handler.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// SQLite file used by the `record` logger when no `db_uri` is given.
    /// Defaults to [`default_store_path`].
    pub fn default_store(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_store = Some(path.into());
        self
    }

    /// Build a [`HandlerFactory`].
    pub fn build(self) -> Result<HandlerFactory, SmsGateError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(ConfigError::HttpClient)?;
        let mut factory = HandlerFactory::with_transport(Arc::new(ReqwestTransport::new(client)));
        if let Some(path) = self.default_store {
            factory.default_store = path;
        }
        Ok(factory)
    }
}

#[derive(Clone)]
/// Assembles [`Handler`]s from registry keys.
///
/// Providers: `smsc.ru`, `smstraffic.ru`. Loggers: `text` (alias `simple`),
/// `record` (alias `sqlite`). All handlers created by one factory share its
/// HTTP client.
pub struct HandlerFactory {
    http: Arc<dyn HttpTransport>,
    default_store: PathBuf,
}

impl Default for HandlerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerFactory {
    /// Create a factory with transport defaults (no timeout).
    ///
    /// For more customization, use [`HandlerFactory::builder`].
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new(reqwest::Client::new())))
    }

    pub fn builder() -> HandlerFactoryBuilder {
        HandlerFactoryBuilder::new()
    }

    fn with_transport(http: Arc<dyn HttpTransport>) -> Self {
        Self {
            http,
            default_store: default_store_path(),
        }
    }

    /// Store file the `record` logger falls back to without a `db_uri`.
    pub fn default_store(&self) -> &Path {
        &self.default_store
    }

    /// Build a handler for `provider_key` that records outcomes through
    /// `logger_key`.
    ///
    /// `overrides` are merged over the provider's default credentials. See
    /// [`LOGIN_KEY`], [`PASSWORD_KEY`], [`SENDER_KEY`], [`ENDPOINT_KEY`],
    /// [`AUTH_ENDPOINT_KEY`] and [`DB_URI_KEY`]. Without `db_uri` the
    /// `record` logger writes to [`HandlerFactory::default_store`], creating
    /// it if needed.
    ///
    /// Errors:
    /// - [`SmsGateError::Configuration`] for unknown keys or overrides,
    /// - [`SmsGateError::Validation`] for empty credentials,
    /// - [`SmsGateError::Storage`] when the result store cannot be opened,
    /// - [`SmsGateError::Authentication`] when `smstraffic.ru` refuses a token.
    pub async fn create(
        &self,
        provider_key: &str,
        logger_key: &str,
        overrides: &Overrides,
    ) -> Result<Handler, SmsGateError> {
        let provider_kind: ProviderKind = provider_key.parse()?;
        let logger_kind: LoggerKind = logger_key.parse()?;
        let settings = HandlerSettings::resolve(provider_kind, Some(logger_kind), overrides)?;

        let (logger, records) = match logger_kind {
            LoggerKind::Text => {
                let logger: Arc<dyn ResultLogger> = Arc::new(TextLogger::new());
                (logger, None)
            }
            LoggerKind::Record => {
                let store = match settings.db_uri.as_deref() {
                    Some(uri) => RecordLogger::connect(uri).await?,
                    None => RecordLogger::connect_or_create(&self.default_store).await?,
                };
                let store = Arc::new(store);
                let logger: Arc<dyn ResultLogger> = store.clone();
                (logger, Some(store))
            }
        };

        let mut handler = self.compose(provider_kind, settings, logger).await?;
        handler.logger_kind = Some(logger_kind);
        handler.records = records;
        info!(provider = %provider_kind, logger = %logger_kind, "Handler ready");
        Ok(handler)
    }

    /// Build a handler for `provider_key` around a caller-supplied logger.
    ///
    /// Logger-specific overrides (`db_uri`) are rejected.
    pub async fn create_with_logger(
        &self,
        provider_key: &str,
        logger: Arc<dyn ResultLogger>,
        overrides: &Overrides,
    ) -> Result<Handler, SmsGateError> {
        let provider_kind: ProviderKind = provider_key.parse()?;
        let settings = HandlerSettings::resolve(provider_kind, None, overrides)?;
        let handler = self.compose(provider_kind, settings, logger).await?;
        info!(provider = %provider_kind, logger = "custom", "Handler ready");
        Ok(handler)
    }

    /// Second construction phase: the logger already exists and is handed to
    /// the provider, which may log while it is being built.
    async fn compose(
        &self,
        provider_kind: ProviderKind,
        settings: HandlerSettings,
        logger: Arc<dyn ResultLogger>,
    ) -> Result<Handler, SmsGateError> {
        let provider: Box<dyn GatewayProvider> = match provider_kind {
            ProviderKind::Smsc => Box::new(SmscProvider::new(
                settings.credentials,
                settings.endpoint,
                self.http.clone(),
                logger,
            )),
            ProviderKind::SmsTraffic => {
                let auth_endpoint = settings
                    .auth_endpoint
                    .as_deref()
                    .unwrap_or(crate::provider::DEFAULT_SMSTRAFFIC_AUTH_ENDPOINT);
                Box::new(
                    SmsTrafficProvider::authenticate(
                        settings.credentials,
                        auth_endpoint,
                        settings.endpoint,
                        self.http.clone(),
                        logger,
                    )
                    .await?,
                )
            }
        };

        Ok(Handler {
            provider_kind,
            logger_kind: None,
            provider,
            records: None,
        })
    }
}
