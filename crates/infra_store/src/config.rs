//! Store configuration
//!
//! Read once at startup. The access key should be the service-role key so
//! row-level security policies do not hide rows from the façade; the plain
//! anon key is accepted as a fallback.

use std::fmt;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Connection settings for the hosted claims table
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted database project, e.g. `https://abc.supabase.co`
    pub endpoint: String,
    /// Access key sent as both `apikey` and bearer token
    pub api_key: String,
    /// Name of the claims table
    pub table_name: String,
}

/// Raw environment variables, before fallbacks are applied
#[derive(Debug, Default, Deserialize)]
struct StoreEnv {
    supabase_endpoint: Option<String>,
    supabase_service_role_key: Option<String>,
    supabase_key: Option<String>,
    table_name: Option<String>,
}

impl StoreConfig {
    /// Creates a configuration from explicit values
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            table_name: table_name.into(),
        }
    }

    /// Loads configuration from the process environment
    ///
    /// Reads `SUPABASE_ENDPOINT`, `SUPABASE_SERVICE_ROLE_KEY` (falling back to
    /// `SUPABASE_KEY`) and `TABLE_NAME`.
    ///
    /// # Errors
    ///
    /// Returns an error if any required setting is missing or empty
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    /// Loads configuration from the given environment source
    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let env: StoreEnv = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        let endpoint = non_empty(env.supabase_endpoint)
            .ok_or_else(|| missing("SUPABASE_ENDPOINT"))?;
        let api_key = non_empty(env.supabase_service_role_key)
            .or_else(|| non_empty(env.supabase_key))
            .ok_or_else(|| missing("SUPABASE_SERVICE_ROLE_KEY or SUPABASE_KEY"))?;
        let table_name = non_empty(env.table_name)
            .ok_or_else(|| missing("TABLE_NAME"))?;

        Ok(Self {
            endpoint,
            api_key,
            table_name,
        })
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("table_name", &self.table_name)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing(name: &str) -> ConfigError {
    ConfigError::Message(format!("missing required environment variable {}", name))
}
