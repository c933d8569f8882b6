//! Settings of the resolver itself.

use crate::error::{ResolveError, Result};
use crate::schema::DEFAULT_MAX_INHERITANCE_LIMIT;
use config::{Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Prefix of the environment variables that override resolver settings.
pub const SETTINGS_ENV_PREFIX: &str = "ENV_CONFIG";

/// Tunables of a [`Resolver`](crate::core::Resolver).
///
/// Loaded with the usual precedence: built-in defaults, then an optional
/// settings file (YAML, TOML or JSON by extension), then `ENV_CONFIG_*`
/// environment variables.
///
/// # Examples
///
/// ```rust
/// use typed_env::core::ResolverSettings;
///
/// let settings = ResolverSettings::default();
/// assert_eq!(settings.max_inheritance_limit, 15);
/// assert!(!settings.log_raw_values);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Maximum number of types walked in one inheritance chain
    /// (`ENV_CONFIG_MAX_INHERITANCE_LIMIT`).
    pub max_inheritance_limit: usize,

    /// Include raw values in trace logs (`ENV_CONFIG_LOG_RAW_VALUES`).
    /// Off by default since environments routinely carry secrets.
    pub log_raw_values: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_inheritance_limit: DEFAULT_MAX_INHERITANCE_LIMIT,
            log_raw_values: false,
        }
    }
}

impl ResolverSettings {
    /// Load settings from an optional file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Settings`] if the file cannot be read or parsed,
    /// or a value is out of range.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(file, None)
    }

    /// Like [`load`](Self::load), reading `ENV_CONFIG_*` from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("max_inheritance_limit", defaults.max_inheritance_limit as i64)
            .and_then(|b| b.set_default("log_raw_values", defaults.log_raw_values))
            .map_err(|e| ResolveError::Settings(format!("Failed to apply defaults: {}", e)))?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        let environment = Environment::with_prefix(SETTINGS_ENV_PREFIX)
            .try_parsing(true)
            .source(env.map(|vars| vars.into_iter().collect()));
        builder = builder.add_source(environment);

        let settings: Self = builder
            .build()
            .map_err(|e| ResolveError::Settings(format!("Failed to load settings: {}", e)))?
            .try_deserialize()
            .map_err(|e| ResolveError::Settings(format!("Failed to parse settings: {}", e)))?;

        settings.validate()?;
        tracing::debug!(
            max_inheritance_limit = settings.max_inheritance_limit,
            log_raw_values = settings.log_raw_values,
            "resolver settings loaded"
        );
        Ok(settings)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_inheritance_limit == 0 {
            return Err(ResolveError::Settings(
                "max_inheritance_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
