//! The resolution engine.

use super::context::ResolutionContext;
use super::locator::{Located, RawMap};
use super::{FieldPath, ResolverSettings};
use crate::cast;
use crate::error::{CastAttempt, ResolveError, Result, SchemaConfigurationError, TypeCastingError};
use crate::naming;
use crate::schema::{CandidateShape, Schema, SchemaField, TypeCandidate, TypeDecl, aggregate};
use crate::typed::EnvConfig;
use crate::value::{ResolvedObject, Value};
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

type SchemaCache = HashMap<u64, Arc<Schema>>;

/// Resolves raw key/value maps against type declarations.
///
/// A resolver owns a cache of aggregated schemas keyed by declaration identity.
/// The cache is read lock-free and is the only state shared between calls, so
/// one resolver can serve concurrent `resolve` calls from many threads.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use typed_env::core::Resolver;
/// use typed_env::schema::{FieldDescriptor, TypeCandidate, TypeDecl};
/// use typed_env::value::Value;
///
/// let nested = TypeDecl::builder("NestedConfig")
///     .field(FieldDescriptor::new("name").candidate(TypeCandidate::integer()))
///     .build();
/// let config = TypeDecl::builder("Config")
///     .field(FieldDescriptor::new("name").candidate(TypeCandidate::string()))
///     .field(FieldDescriptor::new("deep").candidate(TypeCandidate::nested(nested)))
///     .build();
///
/// let raw: HashMap<String, String> = [("NAME", "car"), ("DEEP_NAME", "111")]
///     .into_iter()
///     .map(|(k, v)| (k.to_string(), v.to_string()))
///     .collect();
///
/// let resolved = Resolver::new().resolve(&config, &raw).unwrap();
/// let deep = resolved.get("deep").and_then(Value::as_object).unwrap();
/// assert_eq!(deep.get("name"), Some(&Value::Integer(111)));
/// ```
pub struct Resolver {
    settings: ResolverSettings,
    schemas: ArcSwap<SchemaCache>,
}

impl Resolver {
    /// A resolver with default settings.
    pub fn new() -> Self {
        Self::with_settings(ResolverSettings::default())
    }

    /// A resolver with the given settings.
    pub fn with_settings(settings: ResolverSettings) -> Self {
        Self {
            settings,
            schemas: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// The settings this resolver was built with.
    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Aggregated schema of `decl`, computed once and cached.
    ///
    /// The cache is keyed by declaration identity and never evicts on its own.
    /// Build each declaration once (a `static LazyLock` works well) rather than
    /// per call, or call [`clear_cache`](Self::clear_cache) on long-lived
    /// resolvers that see freshly built declarations.
    ///
    /// # Errors
    ///
    /// Returns a schema configuration error if the declaration chain is malformed.
    pub fn schema(&self, decl: &TypeDecl) -> Result<Arc<Schema>> {
        let cached = self.schemas.load().get(&decl.id()).cloned();
        if let Some(schema) = cached {
            return Ok(schema);
        }

        let schema = Arc::new(aggregate(decl, self.settings.max_inheritance_limit)?);
        debug!(
            schema = schema.name(),
            fields = schema.fields().len(),
            depth = schema.depth(),
            "aggregated schema"
        );
        self.schemas.rcu(|current| {
            let mut next = SchemaCache::clone(current);
            next.insert(decl.id(), Arc::clone(&schema));
            next
        });
        Ok(schema)
    }

    /// Number of cached schemas.
    pub fn cached_schemas(&self) -> usize {
        self.schemas.load().len()
    }

    /// Drop every cached schema.
    pub fn clear_cache(&self) {
        self.schemas.store(Arc::new(HashMap::new()));
    }

    /// Resolve `raw` against `decl` into a sealed object tree.
    ///
    /// Resolution is all-or-nothing: the first error aborts the whole call.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::SchemaConfiguration`] for malformed metadata
    /// - [`ResolveError::MissingValue`] for a required field with no usable key
    /// - [`ResolveError::TypeCasting`] when no type candidate accepts a located value
    /// - [`ResolveError::KeyCollision`] when two fields consume the same key
    pub fn resolve(&self, decl: &TypeDecl, raw: &RawMap) -> Result<ResolvedObject> {
        let schema = self.schema(decl)?;
        let mut ctx = ResolutionContext::new(raw, self.settings.log_raw_values);

        debug!(schema = schema.name(), keys = raw.len(), "resolving configuration");
        let object = self.resolve_schema(&mut ctx, &schema, "", &FieldPath::root())?;
        debug!(schema = schema.name(), claimed = ctx.claimed(), "configuration resolved");

        Ok(object)
    }

    /// Resolve `raw` and convert the result into `T`.
    pub fn load<T: EnvConfig>(&self, raw: &RawMap) -> Result<T> {
        let decl = T::declaration();
        let object = self.resolve(&decl, raw)?;
        T::from_resolved(&object)
    }

    fn resolve_schema(
        &self,
        ctx: &mut ResolutionContext<'_>,
        schema: &Schema,
        prefix: &str,
        parent: &FieldPath,
    ) -> Result<ResolvedObject> {
        let mut object = ResolvedObject::builder(schema.name());
        for (key, value) in schema.values() {
            object.insert(key.clone(), value.clone());
        }

        for field in schema.fields() {
            let path = parent.child(field.owner(), field.key());
            let value = match self.resolve_field(ctx, field, prefix, &path)? {
                Some(value) => value,
                None => match field.default() {
                    Some(default) => default.clone(),
                    None => continue,
                },
            };
            object.insert(field.key().clone(), value);
        }

        Ok(object.seal())
    }

    /// `Ok(None)` means "keep the field's default".
    fn resolve_field(
        &self,
        ctx: &mut ResolutionContext<'_>,
        field: &SchemaField,
        prefix: &str,
        path: &FieldPath,
    ) -> Result<Option<Value>> {
        let descriptor = field.descriptor();
        let candidates = descriptor.candidates();
        let keys = naming::candidate_keys(field.base_names(), prefix);
        let located = ctx.locate(&keys);

        let mut attempts = Vec::with_capacity(candidates.len());
        let mut unparsable = false;
        let mut nested_error = None;

        for candidate in candidates {
            if let CandidateShape::Nested { decl, prefix: policy } = candidate.shape() {
                let child_prefix = naming::child_prefix(prefix, field.own_name(), policy);
                let require_value = candidates.len() > 1;
                match self.try_nested(ctx, decl, &child_prefix, path, require_value)? {
                    Ok(object) => {
                        trace!(field = %path, prefix = %child_prefix, "resolved nested field");
                        return Ok(Some(Value::Nested(object)));
                    }
                    Err(err) => {
                        unparsable |= !matches!(err, ResolveError::MissingValue { .. });
                        attempts.push(attempt(candidate, None, single_line(&err.to_string())));
                        nested_error.get_or_insert(err);
                    }
                }
                continue;
            }

            let Located::Present { key, value } = located else {
                attempts.push(attempt(candidate, None, "no value is set".to_string()));
                continue;
            };
            if value.trim().is_empty() && !candidate.allows_empty() {
                attempts.push(attempt(candidate, Some(key), "value is blank".to_string()));
                continue;
            }
            match cast::cast(candidate, value) {
                Ok(resolved) => {
                    ctx.claim(key, path, descriptor.allows_conflicting_name())?;
                    ctx.record_resolved();
                    trace!(
                        field = %path,
                        key,
                        kind = %candidate.kind(),
                        value = ctx.loggable(value),
                        "resolved field"
                    );
                    return Ok(Some(resolved));
                }
                Err(failure) => {
                    unparsable = true;
                    attempts.push(attempt(candidate, Some(key), failure.to_string()));
                }
            }
        }

        if unparsable {
            // A lone nested candidate reports the inner error as-is
            if let (Some(err), 1) = (nested_error, candidates.len()) {
                return Err(err);
            }
            let raw = match located {
                Located::Present { value, .. } => Some(value.to_string()),
                Located::Absent => None,
            };
            return Err(TypeCastingError {
                path: path.clone(),
                keys,
                raw,
                attempts,
            }
            .into());
        }

        if field.default().is_some() {
            trace!(field = %path, "no value located, keeping default");
            return Ok(None);
        }
        if candidates.iter().any(TypeCandidate::is_optional) {
            trace!(field = %path, "no value located for optional field");
            return Ok(Some(Value::None));
        }

        let has_scalar = candidates
            .iter()
            .any(|candidate| !matches!(candidate.shape(), CandidateShape::Nested { .. }));
        match nested_error {
            Some(err) if !has_scalar => Err(err),
            _ => Err(ResolveError::MissingValue {
                path: path.clone(),
                keys,
            }),
        }
    }

    /// Trial sub-resolution of a nested candidate.
    ///
    /// Missing and unparsable values come back as `Ok(Err(..))` with the trial's
    /// key claims undone; anything else is fatal. With `require_value`, a trial
    /// that locates no value at all (only defaults and optionals) is missing too.
    fn try_nested(
        &self,
        ctx: &mut ResolutionContext<'_>,
        decl: &TypeDecl,
        prefix: &str,
        path: &FieldPath,
        require_value: bool,
    ) -> Result<std::result::Result<ResolvedObject, ResolveError>> {
        let schema = self.schema(decl)?;
        if schema.fields().is_empty() {
            return Err(SchemaConfigurationError::EmptyNestedSchema {
                path: path.to_string(),
                type_name: schema.name().to_string(),
            }
            .into());
        }

        let checkpoint = ctx.checkpoint();
        let resolved_before = ctx.resolved();
        match self.resolve_schema(ctx, &schema, prefix, path) {
            Ok(_) if require_value && ctx.resolved() == resolved_before => {
                ctx.rollback(checkpoint);
                let keys = schema
                    .fields()
                    .iter()
                    .flat_map(|field| naming::candidate_keys(field.base_names(), prefix))
                    .collect();
                Ok(Err(ResolveError::MissingValue {
                    path: path.clone(),
                    keys,
                }))
            }
            Ok(object) => Ok(Ok(object)),
            Err(err @ (ResolveError::MissingValue { .. } | ResolveError::TypeCasting(_))) => {
                ctx.rollback(checkpoint);
                Ok(Err(err))
            }
            Err(err) => Err(err),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

fn attempt(candidate: &TypeCandidate, key: Option<&str>, reason: String) -> CastAttempt {
    CastAttempt {
        kind: candidate.kind(),
        is_array: candidate.is_array(),
        key: key.map(str::to_string),
        allowed: candidate.enum_domain().map(ToString::to_string),
        reason,
    }
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Resolve `raw` against `decl` with a default [`Resolver`].
pub fn resolve(decl: &TypeDecl, raw: &RawMap) -> Result<ResolvedObject> {
    Resolver::new().resolve(decl, raw)
}

/// Resolve `raw` into `T` with a default [`Resolver`].
pub fn load_env_config<T: EnvConfig>(raw: &RawMap) -> Result<T> {
    Resolver::new().load(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDescriptor, Prefix};

    fn raw(pairs: &[(&str, &str)]) -> RawMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn named(name: &str) -> Arc<TypeDecl> {
        TypeDecl::builder(name)
            .field(FieldDescriptor::new("name").candidate(TypeCandidate::string()))
            .build()
    }

    #[test]
    fn test_schema_is_cached() {
        let resolver = Resolver::new();
        let decl = named("Named");

        let first = resolver.schema(&decl).unwrap();
        let second = resolver.schema(&decl).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.cached_schemas(), 1);

        resolver.clear_cache();
        assert_eq!(resolver.cached_schemas(), 0);
    }

    #[test]
    fn test_failed_trial_releases_its_keys() {
        // The nested trial claims PAIR_NAME, then fails on PAIR_PORT; the
        // string fallback must still be able to consume PAIR_NAME afterwards.
        let pair = TypeDecl::builder("Pair")
            .field(FieldDescriptor::new("name").candidate(TypeCandidate::string()))
            .field(FieldDescriptor::new("port").candidate(TypeCandidate::integer()))
            .build();
        let config = TypeDecl::builder("Config")
            .field(
                FieldDescriptor::new("pair")
                    .candidate(TypeCandidate::nested(pair))
                    .candidate(TypeCandidate::string()),
            )
            .field(FieldDescriptor::new("label").name("PAIR_NAME").candidate(TypeCandidate::string()))
            .build();

        let resolved = Resolver::new()
            .resolve(&config, &raw(&[("PAIR", "plain"), ("PAIR_NAME", "x"), ("PAIR_PORT", "nope")]))
            .unwrap();
        assert_eq!(resolved.get("pair"), Some(&Value::from("plain")));
        assert_eq!(resolved.get("label"), Some(&Value::from("x")));
    }

    #[test]
    fn test_nested_trial_without_located_values_is_absent() {
        let optional = TypeDecl::builder("Optional")
            .field(FieldDescriptor::new("name").candidate(TypeCandidate::string().optional()))
            .field(FieldDescriptor::new("port").candidate(TypeCandidate::integer()).default_value(80i64))
            .build();
        let mixed = TypeDecl::builder("Config")
            .field(
                FieldDescriptor::new("mixed")
                    .candidate(TypeCandidate::nested(Arc::clone(&optional)))
                    .candidate(TypeCandidate::integer()),
            )
            .build();

        let resolver = Resolver::new();
        let resolved = resolver.resolve(&mixed, &raw(&[("MIXED", "5")])).unwrap();
        assert_eq!(resolved.get("mixed"), Some(&Value::Integer(5)));

        let resolved = resolver.resolve(&mixed, &raw(&[("MIXED_PORT", "8080")])).unwrap();
        let object = resolved.get("mixed").and_then(Value::as_object).unwrap();
        assert_eq!(object.get("port"), Some(&Value::Integer(8080)));

        // A lone nested candidate still yields an object built from defaults
        let lone = TypeDecl::builder("Config")
            .field(FieldDescriptor::new("deep").candidate(TypeCandidate::nested(optional)))
            .build();
        let resolved = resolver.resolve(&lone, &RawMap::new()).unwrap();
        let deep = resolved.get("deep").and_then(Value::as_object).unwrap();
        assert_eq!(deep.get("name"), Some(&Value::None));
        assert_eq!(deep.get("port"), Some(&Value::Integer(80)));
    }

    #[test]
    fn test_empty_nested_schema() {
        let empty = TypeDecl::builder("Empty").build();
        let config = TypeDecl::builder("Config")
            .field(FieldDescriptor::new("deep").candidate(TypeCandidate::nested(empty)))
            .build();

        let err = Resolver::new().resolve(&config, &RawMap::new()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaConfiguration(SchemaConfigurationError::EmptyNestedSchema { .. })
        ));
    }

    #[test]
    fn test_limit_comes_from_settings() {
        let base = named("Base");
        let child = TypeDecl::builder("Child").extends(base).build();
        let main = TypeDecl::builder("Main").extends(child).build();
        let settings = ResolverSettings {
            max_inheritance_limit: 2,
            ..ResolverSettings::default()
        };

        let err = Resolver::with_settings(settings)
            .resolve(&main, &raw(&[("NAME", "x")]))
            .unwrap_err();
        assert!(err.to_string().contains("Base"));
    }

    #[test]
    fn test_nested_missing_propagates_inner_path() {
        let config = TypeDecl::builder("Config")
            .field(
                FieldDescriptor::new("deep")
                    .candidate(TypeCandidate::nested_with_prefix(named("Named"), Prefix::Custom("inner".into()))),
            )
            .build();

        let err = Resolver::new().resolve(&config, &RawMap::new()).unwrap_err();
        match err {
            ResolveError::MissingValue { path, keys } => {
                assert_eq!(path.to_string(), "Config.deep -> Named.name");
                assert_eq!(keys, vec!["INNER_NAME"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
