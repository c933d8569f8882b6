//! Builder for constructing TypedEnv instances.

use crate::core::{RawMap, RawMapLoader, Resolver, ResolverSettings};
use crate::error::Result;
use crate::schema::TypeDecl;
use crate::sources::{ConfigSource, EnvSource, MapSource};
use crate::typed::EnvConfig;
use crate::value::ResolvedObject;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A merged raw map paired with the resolver that interprets it.
///
/// Built once with [`TypedEnv::builder`]; resolving against it never
/// touches the sources again.
///
/// # Examples
///
/// ```rust
/// use typed_env::prelude::*;
///
/// let env = TypedEnv::builder()
///     .with_map([("PORT", "8080")])
///     .build()
///     .unwrap();
///
/// let decl = TypeDecl::builder("Server")
///     .field(FieldDescriptor::new("port").candidate(TypeCandidate::integer()))
///     .build();
/// let server = env.resolve(&decl).unwrap();
/// assert_eq!(server.get("port"), Some(&Value::Integer(8080)));
/// ```
pub struct TypedEnv {
    raw: RawMap,
    resolver: Arc<Resolver>,
}

impl TypedEnv {
    /// Create a new builder for constructing a handle.
    pub fn builder() -> TypedEnvBuilder {
        TypedEnvBuilder::new()
    }

    /// The merged raw map.
    pub fn raw(&self) -> &RawMap {
        &self.raw
    }

    /// The resolver, shareable with other handles.
    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    /// Resolve the merged map against `decl`.
    ///
    /// Schemas are cached per declaration; reuse declarations across calls.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn resolve(&self, decl: &TypeDecl) -> Result<ResolvedObject> {
        self.resolver.resolve(decl, &self.raw)
    }

    /// Resolve the merged map into `T`.
    ///
    /// # Errors
    ///
    /// Resolution errors, or [`ResolveError::Extraction`](crate::error::ResolveError::Extraction)
    /// when `T` disagrees with its own declaration.
    pub fn load<T: EnvConfig>(&self) -> Result<T> {
        self.resolver.load(&self.raw)
    }
}

/// Builder for constructing a [`TypedEnv`] handle.
///
/// Provides a fluent interface for choosing sources and resolver settings.
///
/// # Examples
///
/// ```rust,no_run
/// use typed_env::prelude::*;
///
/// # fn example() -> Result<()> {
/// let env = TypedEnv::builder()
///     .with_map([("LOG_LEVEL", "info")])
///     .with_process_env()
///     .with_settings_file("config/resolver.toml")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct TypedEnvBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
    settings: Option<ResolverSettings>,
    settings_file: Option<PathBuf>,
    max_inheritance_limit: Option<usize>,
    resolver: Option<Arc<Resolver>>,
}

impl TypedEnvBuilder {
    /// Create a new builder with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            settings: None,
            settings_file: None,
            max_inheritance_limit: None,
            resolver: None,
        }
    }

    /// Add the whole process environment (priority 300).
    pub fn with_process_env(self) -> Self {
        self.with_source(EnvSource::new())
    }

    /// Add the process environment variables starting with `prefix` (priority 300).
    ///
    /// Keys keep their full names.
    pub fn with_env(self, prefix: &str) -> Self {
        self.with_source(EnvSource::new().with_prefix(prefix))
    }

    /// Add fixed key/value pairs (priority 100).
    pub fn with_map<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let index = self.sources.len();
        self.with_source(MapSource::from_pairs(format!("#{}", index), pairs))
    }

    /// Add a custom source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_env::prelude::*;
    /// use typed_env::sources::MapSource;
    ///
    /// let fallback = MapSource::new("fallback")
    ///     .with_value("HOST", "localhost")
    ///     .with_priority(50);
    ///
    /// let env = TypedEnv::builder().with_source(fallback).build().unwrap();
    /// assert_eq!(env.raw().len(), 1);
    /// ```
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Use these settings instead of loading them.
    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Load resolver settings from this file (then `ENV_CONFIG_*` overrides).
    ///
    /// Ignored when [`with_settings`](Self::with_settings) is also used.
    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    /// Override the inheritance limit, whatever the settings say.
    pub fn with_max_inheritance_limit(mut self, limit: usize) -> Self {
        self.max_inheritance_limit = Some(limit);
        self
    }

    /// Reuse an existing resolver and its schema cache.
    ///
    /// Settings given to this builder are then ignored.
    pub fn with_resolver(mut self, resolver: Arc<Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Build the handle.
    ///
    /// This loads every source once and merges them by priority.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No source was added
    /// - A source fails to load
    /// - Settings cannot be loaded or are out of range
    pub fn build(self) -> Result<TypedEnv> {
        let resolver = match self.resolver {
            Some(resolver) => resolver,
            None => {
                let mut settings = match self.settings {
                    Some(settings) => settings,
                    None => ResolverSettings::load(self.settings_file.as_deref())?,
                };
                if let Some(limit) = self.max_inheritance_limit {
                    settings.max_inheritance_limit = limit;
                }
                settings.validate()?;
                Arc::new(Resolver::with_settings(settings))
            }
        };

        let mut loader = RawMapLoader::new();
        for source in self.sources {
            loader.add_source(source);
        }
        let raw = loader.load()?;
        debug!(sources = ?loader.source_names(), keys = raw.len(), "typed env built");

        Ok(TypedEnv { raw, resolver })
    }
}

impl Default for TypedEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;

    #[test]
    fn test_builder_accumulates_sources() {
        let builder = TypedEnvBuilder::new()
            .with_map([("A", "1")])
            .with_map([("B", "2")])
            .with_env("APP_");

        assert_eq!(builder.sources.len(), 3);
    }

    #[test]
    fn test_build_without_sources() {
        let result = TypedEnvBuilder::new()
            .with_settings(ResolverSettings::default())
            .build();
        assert!(matches!(result, Err(ResolveError::NoSources)));
    }

    #[test]
    fn test_limit_override() {
        let env = TypedEnvBuilder::new()
            .with_settings(ResolverSettings::default())
            .with_max_inheritance_limit(3)
            .with_map([("A", "1")])
            .build()
            .unwrap();
        assert_eq!(env.resolver().settings().max_inheritance_limit, 3);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let result = TypedEnvBuilder::new()
            .with_settings(ResolverSettings::default())
            .with_max_inheritance_limit(0)
            .with_map([("A", "1")])
            .build();
        assert!(matches!(result, Err(ResolveError::Settings(_))));
    }

    #[test]
    fn test_shared_resolver() {
        let resolver = Arc::new(Resolver::new());
        let first = TypedEnvBuilder::new()
            .with_resolver(Arc::clone(&resolver))
            .with_map([("A", "1")])
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(first.resolver(), &resolver));
    }
}
