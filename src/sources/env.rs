//! Process environment source.

use super::ConfigSource;
use crate::core::RawMap;
use crate::error::Result;
use std::env;
use tracing::warn;

/// Reads the process environment.
///
/// Variables whose name or value is not valid Unicode are skipped with a warning.
///
/// # Examples
///
/// ```rust
/// use typed_env::sources::{ConfigSource, EnvSource};
///
/// // Only APP_* variables, kept under their full names
/// let source = EnvSource::new().with_prefix("APP_");
/// assert_eq!(source.name(), "env:APP_*");
/// ```
pub struct EnvSource {
    prefix: Option<String>,
    priority: i32,
}

impl EnvSource {
    /// Create a source over every environment variable.
    pub fn new() -> Self {
        Self {
            prefix: None,
            priority: 300, // Env vars have highest priority by default
        }
    }

    /// Keep only variables whose name starts with `prefix`.
    ///
    /// Names are not stripped; use a nested prefix in the schema to address them.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn accepts(&self, key: &str) -> bool {
        self.prefix
            .as_deref()
            .is_none_or(|prefix| key.starts_with(prefix))
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Result<RawMap> {
        let mut map = RawMap::new();
        for (key, value) in env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    if self.accepts(&key) {
                        map.insert(key, value);
                    }
                }
                (Ok(key), Err(_)) => warn!(key = %key, "skipping environment variable with a non-unicode value"),
                (Err(key), _) => warn!(key = ?key, "skipping environment variable with a non-unicode name"),
            }
        }
        Ok(map)
    }

    fn name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("env:{}*", prefix),
            None => "env".to_string(),
        }
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
