//! Field identity and per-field declarations.

use super::TypeCandidate;
use crate::value::Value;
use std::fmt;

/// Opaque identity of a field.
///
/// Plain names drive the fallback naming convention; symbolic keys must be given
/// an explicit candidate name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    /// A regular field name, e.g. `myName`
    Name(String),
    /// A symbolic key identified by its description
    Symbol(String),
}

impl FieldKey {
    /// A symbolic key with the given description.
    pub fn symbol(description: impl Into<String>) -> Self {
        Self::Symbol(description.into())
    }

    /// Whether this is a symbolic key.
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Symbol(description) => write!(f, "Symbol({})", description),
        }
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// One declared field of a type.
///
/// # Examples
///
/// ```rust
/// use typed_env::schema::{FieldDescriptor, TypeCandidate};
///
/// let field = FieldDescriptor::new("first")
///     .named(["FIRST3", "FIRST2", "FIRST1"])
///     .candidate(TypeCandidate::integer());
/// assert_eq!(field.names().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    key: FieldKey,
    names: Vec<String>,
    candidates: Vec<TypeCandidate>,
    default: Option<Value>,
    allow_conflicting_name: bool,
}

impl FieldDescriptor {
    /// Start a descriptor for `key` with no names and no candidates.
    pub fn new(key: impl Into<FieldKey>) -> Self {
        Self {
            key: key.into(),
            names: Vec::new(),
            candidates: Vec::new(),
            default: None,
            allow_conflicting_name: false,
        }
    }

    /// Add one explicit candidate source name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Add explicit candidate source names, tried in the given order.
    pub fn named<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Append a type candidate; candidates are attempted in the order added.
    pub fn candidate(mut self, candidate: TypeCandidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Value kept when every candidate is absent.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Permit another field to consume the same source key.
    pub fn allow_conflicting_name(mut self) -> Self {
        self.allow_conflicting_name = true;
        self
    }

    /// The field identity.
    pub fn key(&self) -> &FieldKey {
        &self.key
    }

    /// Explicit candidate names as declared (not normalized).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Type candidates in declaration order.
    pub fn candidates(&self) -> &[TypeCandidate] {
        &self.candidates
    }

    /// Declared default, if any.
    pub fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether source-key sharing is permitted for this field.
    pub fn allows_conflicting_name(&self) -> bool {
        self.allow_conflicting_name
    }
}
