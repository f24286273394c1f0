use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::{Credentials, SenderId};
use crate::error::{ConfigError, SmsGateError};
use crate::provider::{
    DEFAULT_SMSC_ENDPOINT, DEFAULT_SMSTRAFFIC_AUTH_ENDPOINT, DEFAULT_SMSTRAFFIC_ENDPOINT,
};

/// Per-handler settings layered over a provider's defaults.
pub type Overrides = BTreeMap<String, String>;

pub const LOGIN_KEY: &str = "login";
pub const PASSWORD_KEY: &str = "password";
pub const SENDER_KEY: &str = "sender";
/// Store location for the `record` logger (sqlx SQLite URL or path).
pub const DB_URI_KEY: &str = "db_uri";
/// Send URL, for both providers.
pub const ENDPOINT_KEY: &str = "endpoint";
/// Token URL, `smstraffic.ru` only.
pub const AUTH_ENDPOINT_KEY: &str = "auth_endpoint";

const DEFAULT_LOGIN: &str = "login";
const DEFAULT_PASSWORD: &str = "pass";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Registered SMS gateways.
pub enum ProviderKind {
    /// `smsc.ru`: query-parameter GET.
    Smsc,
    /// `smstraffic.ru`: token-authorized POST.
    SmsTraffic,
}

impl ProviderKind {
    pub const ALL: [Self; 2] = [Self::Smsc, Self::SmsTraffic];

    /// Registry key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Smsc => "smsc.ru",
            Self::SmsTraffic => "smstraffic.ru",
        }
    }

    fn default_credentials(self) -> [(&'static str, &'static str); 2] {
        match self {
            Self::Smsc | Self::SmsTraffic => [
                (LOGIN_KEY, DEFAULT_LOGIN),
                (PASSWORD_KEY, DEFAULT_PASSWORD),
            ],
        }
    }

    fn default_endpoint(self) -> &'static str {
        match self {
            Self::Smsc => DEFAULT_SMSC_ENDPOINT,
            Self::SmsTraffic => DEFAULT_SMSTRAFFIC_ENDPOINT,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| ConfigError::UnknownProvider {
                key: key.to_owned(),
            })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Registered result loggers.
pub enum LoggerKind {
    /// `text` (alias `simple`): one `tracing` line per outcome.
    Text,
    /// `record` (alias `sqlite`): one SQLite row per outcome.
    Record,
}

impl LoggerKind {
    pub const ALL: [Self; 2] = [Self::Text, Self::Record];

    /// Registry key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Record => "record",
        }
    }

    fn alias(self) -> &'static str {
        match self {
            Self::Text => "simple",
            Self::Record => "sqlite",
        }
    }
}

impl FromStr for LoggerKind {
    type Err = ConfigError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == key || kind.alias() == key)
            .ok_or_else(|| ConfigError::UnknownLogger {
                key: key.to_owned(),
            })
    }
}

impl fmt::Display for LoggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Everything a handler needs once defaults and overrides are merged.
#[derive(Debug, Clone)]
pub(crate) struct HandlerSettings {
    pub credentials: Credentials,
    pub endpoint: String,
    pub auth_endpoint: Option<String>,
    /// Explicit store location; `None` means the default store.
    pub db_uri: Option<String>,
}

impl HandlerSettings {
    /// Merge `provider`'s defaults with `overrides` (overrides win).
    ///
    /// `logger` is `None` for caller-supplied loggers, which accept no
    /// logger-specific overrides.
    pub fn resolve(
        provider: ProviderKind,
        logger: Option<LoggerKind>,
        overrides: &Overrides,
    ) -> Result<Self, SmsGateError> {
        let mut params: BTreeMap<&str, &str> =
            provider.default_credentials().into_iter().collect();
        for (key, value) in overrides {
            check_override(provider, logger, key)?;
            params.insert(key.as_str(), value.as_str());
        }

        let mut credentials = Credentials::new(
            params.get(LOGIN_KEY).copied().unwrap_or_default(),
            params.get(PASSWORD_KEY).copied().unwrap_or_default(),
        )?;
        if let Some(sender) = params.get(SENDER_KEY) {
            credentials = credentials.with_sender(SenderId::new(*sender)?);
        }

        let endpoint = parse_endpoint(
            params
                .get(ENDPOINT_KEY)
                .copied()
                .unwrap_or(provider.default_endpoint()),
        )?;
        let auth_endpoint = match provider {
            ProviderKind::Smsc => None,
            ProviderKind::SmsTraffic => Some(parse_endpoint(
                params
                    .get(AUTH_ENDPOINT_KEY)
                    .copied()
                    .unwrap_or(DEFAULT_SMSTRAFFIC_AUTH_ENDPOINT),
            )?),
        };

        Ok(Self {
            credentials,
            endpoint,
            auth_endpoint,
            db_uri: params.get(DB_URI_KEY).map(|uri| (*uri).to_owned()),
        })
    }
}

fn check_override(
    provider: ProviderKind,
    logger: Option<LoggerKind>,
    key: &str,
) -> Result<(), ConfigError> {
    match key {
        LOGIN_KEY | PASSWORD_KEY | SENDER_KEY | ENDPOINT_KEY => Ok(()),
        AUTH_ENDPOINT_KEY if provider == ProviderKind::SmsTraffic => Ok(()),
        AUTH_ENDPOINT_KEY => Err(ConfigError::UnsupportedOverride {
            key: key.to_owned(),
            target: provider.key(),
        }),
        DB_URI_KEY if logger == Some(LoggerKind::Record) => Ok(()),
        DB_URI_KEY => Err(ConfigError::UnsupportedOverride {
            key: key.to_owned(),
            target: logger.map_or("a custom logger", LoggerKind::key),
        }),
        _ => Err(ConfigError::UnknownOverride {
            key: key.to_owned(),
        }),
    }
}

fn parse_endpoint(value: &str) -> Result<String, ConfigError> {
    url::Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint {
        value: value.to_owned(),
        source,
    })?;
    Ok(value.to_owned())
}
