//! Error types for typed-env.
//!
//! Every failure aborts the whole top-level resolution: there is no partial
//! result. Errors carry the field path (`Owner.field -> Nested.field`) and the
//! source keys that were tried so they can be traced back to the declaration.

use crate::core::FieldPath;
use crate::schema::Kind;
use std::fmt;

/// Result type alias for typed-env operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Name of the setting that bounds inheritance chains, as it appears in the environment.
pub const INHERITANCE_LIMIT_SETTING: &str = "ENV_CONFIG_MAX_INHERITANCE_LIMIT";

/// Errors that can occur while resolving a raw key/value map into a typed tree.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The field metadata itself is malformed.
    #[error(transparent)]
    SchemaConfiguration(#[from] SchemaConfigurationError),

    /// No candidate key of a required field is present (or it is blank).
    #[error("Field {path}: {}", describe_missing(.keys))]
    MissingValue {
        /// Path of the field that has no value
        path: FieldPath,
        /// Every source key that was tried, in order
        keys: Vec<String>,
    },

    /// A value was located but none of the declared type candidates accepted it.
    #[error("{0}")]
    TypeCasting(#[from] TypeCastingError),

    /// Two different fields consumed the same source key.
    #[error(
        "Environment variable \"{key}\" is consumed by both {first} and {second}; \
         set allow_conflicting_name on both fields to permit it"
    )]
    KeyCollision {
        /// The shared source key
        key: String,
        /// Path of the field that claimed the key first
        first: FieldPath,
        /// Path of the field that tried to claim it again
        second: FieldPath,
    },

    /// A resolved value could not be converted into the requested Rust type.
    #[error("Field {path}: expected {expected}, found {found}")]
    Extraction {
        /// `Type.field` of the value being extracted
        path: String,
        /// Name of the requested type
        expected: &'static str,
        /// Kind of the value that was actually resolved
        found: &'static str,
    },

    /// A raw map source failed to load.
    #[error("Failed to load source '{name}': {reason}")]
    Source {
        /// Source name as reported by `ConfigSource::name`
        name: String,
        /// Why it failed
        reason: String,
    },

    /// Loading was requested without any raw map source.
    #[error("No configuration sources specified")]
    NoSources,

    /// Resolver settings could not be loaded or are out of range.
    #[error("Invalid resolver settings: {0}")]
    Settings(String),
}

impl ResolveError {
    /// Path of the field the error is attributed to, if any.
    pub fn field_path(&self) -> Option<&FieldPath> {
        match self {
            Self::MissingValue { path, .. } => Some(path),
            Self::TypeCasting(err) => Some(&err.path),
            Self::KeyCollision { second, .. } => Some(second),
            _ => None,
        }
    }
}

fn describe_missing(keys: &[String]) -> String {
    match keys {
        [single] => format!("\"{}\" is required", single),
        _ => format!("one of {} is required", quote_all(keys)),
    }
}

pub(crate) fn quote_all(keys: &[String]) -> String {
    keys.iter()
        .map(|key| format!("\"{}\"", key))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Malformed field metadata. Always fatal for the resolution that found it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaConfigurationError {
    /// A symbolic field key was declared without an explicit candidate name.
    #[error("Field {path} is keyed by a symbol and needs an explicit environment variable name")]
    UnnamedSymbol {
        /// `Owner.Symbol(..)`
        path: String,
    },

    /// The same candidate name appears twice (after upper-casing).
    #[error("Field {path} declares duplicate environment variable names: {}", quote_all(.names))]
    DuplicateNames {
        /// `Owner.field`
        path: String,
        /// The declared names, normalized
        names: Vec<String>,
    },

    /// A field was declared without any type candidate.
    #[error("Field {path} declares no type candidates")]
    NoTypeCandidates {
        /// `Owner.field`
        path: String,
    },

    /// The inheritance chain is deeper than the configured limit.
    #[error(
        "Inheritance chain of {type_name} is too long: {offending} sits at depth {depth}, \
         {} is {limit}",
        INHERITANCE_LIMIT_SETTING
    )]
    InheritanceLimit {
        /// The type the walk started from
        type_name: String,
        /// First type beyond the limit
        offending: String,
        /// 1-based depth of `offending`
        depth: usize,
        /// The configured limit
        limit: usize,
    },

    /// A nested candidate points at a type that declares no fields.
    #[error("Field {path} is nested as {type_name}, which declares no fields")]
    EmptyNestedSchema {
        /// Path of the nesting field
        path: String,
        /// Name of the nested type
        type_name: String,
    },
}

/// One attempted interpretation of a field, kept for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct CastAttempt {
    /// Kind of the type candidate
    pub kind: Kind,
    /// Whether the candidate was in array mode
    pub is_array: bool,
    /// Source key the value came from, if one was located
    pub key: Option<String>,
    /// Rendered enum domain for ENUM candidates
    pub allowed: Option<String>,
    /// Why the candidate did not produce a value (single line)
    pub reason: String,
}

/// No declared type candidate could produce a value for a located field.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCastingError {
    /// Path of the field
    pub path: FieldPath,
    /// Candidate source keys of the field
    pub keys: Vec<String>,
    /// The raw value that was located, if any
    pub raw: Option<String>,
    /// One entry per declared candidate, in declaration order
    pub attempts: Vec<CastAttempt>,
}

impl TypeCastingError {
    /// True when the field declared more than one type candidate.
    pub fn is_multi_type(&self) -> bool {
        self.attempts.len() > 1
    }
}

impl fmt::Display for TypeCastingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attempts.as_slice() {
            [attempt] => {
                let key = attempt.key.as_deref().unwrap_or_default();
                writeln!(f, "Unable to cast {} from environment variable \"{}\"", self.path, key)?;
                writeln!(f, "    Type: {}", attempt.kind)?;
                writeln!(f, "    Is Array: {}", attempt.is_array)?;
                if let Some(allowed) = &attempt.allowed {
                    writeln!(f, "    Allowed Values: {}", allowed)?;
                }
                writeln!(f, "    Reason: {}", attempt.reason)?;
            }
            attempts => {
                writeln!(f, "No acceptable value for multi-type field {}", self.path)?;
                writeln!(f, "    Variables: {}", quote_all(&self.keys))?;
                for attempt in attempts {
                    let array = if attempt.is_array { " (array)" } else { "" };
                    writeln!(f, "    For {}{}: {}", attempt.kind, array, attempt.reason)?;
                }
            }
        }
        if let Some(raw) = &self.raw {
            writeln!(f, "    Value: (string) \"{}\"", raw)?;
        }
        Ok(())
    }
}

impl std::error::Error for TypeCastingError {}
