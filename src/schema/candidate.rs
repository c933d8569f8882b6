//! Type candidates: the ordered interpretations a field may take.

use super::TypeDecl;
use std::fmt;
use std::sync::Arc;

/// Kind of a type candidate, as reported in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Signed decimal integer
    Integer,
    /// Decimal number with optional fractional part
    Float,
    /// Any string
    String,
    /// Truthy/falsy token
    Boolean,
    /// One of a fixed set of raw values
    Enum,
    /// A nested schema resolved from its own keys
    Nested,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Enum => "ENUM",
            Self::Nested => "NESTED",
        };
        f.write_str(name)
    }
}

/// One allowed value of an enum domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumVariant {
    /// Symbolic name of the variant (e.g. `Two`)
    pub name: String,
    /// Raw representation expected in the source map (e.g. `two`)
    pub raw: String,
}

/// Ordered, non-empty set of allowed enum values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDomain {
    variants: Vec<EnumVariant>,
}

impl EnumDomain {
    /// Build a domain from `(name, raw)` pairs.
    ///
    /// Returns `None` when `variants` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_env::schema::EnumDomain;
    ///
    /// let domain = EnumDomain::new([("One", "one"), ("Two", "two")]).unwrap();
    /// assert_eq!(domain.find("two").unwrap().name, "Two");
    /// ```
    pub fn new<I, N, R>(variants: I) -> Option<Self>
    where
        I: IntoIterator<Item = (N, R)>,
        N: Into<String>,
        R: Into<String>,
    {
        let variants: Vec<EnumVariant> = variants
            .into_iter()
            .map(|(name, raw)| EnumVariant {
                name: name.into(),
                raw: raw.into(),
            })
            .collect();
        if variants.is_empty() {
            return None;
        }
        Some(Self { variants })
    }

    /// Build a domain whose variant names equal their raw values.
    pub fn from_values<I, S>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(values.into_iter().map(|value| {
            let value = value.into();
            (value.clone(), value)
        }))
    }

    /// Find the variant whose raw representation equals `raw` (case-sensitive).
    pub fn find(&self, raw: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|variant| variant.raw == raw)
    }

    /// The variants in declaration order.
    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }
}

impl fmt::Display for EnumDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, variant) in self.variants.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{}\": \"{}\"", variant.name, variant.raw)?;
        }
        f.write_str("}")
    }
}

/// Key-prefix policy of a nested candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Prefix {
    /// Parent prefix joined with the field's own derived name.
    #[default]
    Derive,
    /// Replace the prefix entirely.
    Custom(String),
    /// Keep the parent prefix unchanged.
    Disabled,
}

/// Shape-specific data of a candidate; only the attributes relevant to the kind exist.
#[derive(Debug, Clone)]
pub enum CandidateShape {
    /// See [`Kind::Integer`]
    Integer,
    /// See [`Kind::Float`]
    Float,
    /// See [`Kind::String`]
    String,
    /// See [`Kind::Boolean`]
    Boolean,
    /// See [`Kind::Enum`]
    Enum(EnumDomain),
    /// See [`Kind::Nested`]
    Nested {
        /// Declaration of the nested type
        decl: Arc<TypeDecl>,
        /// How the child prefix is composed
        prefix: Prefix,
    },
}

/// One attempted interpretation of a field.
///
/// # Examples
///
/// ```rust
/// use typed_env::schema::{Kind, TypeCandidate};
///
/// let candidate = TypeCandidate::integer().array().optional();
/// assert_eq!(candidate.kind(), Kind::Integer);
/// assert!(candidate.is_array());
/// ```
#[derive(Debug, Clone)]
pub struct TypeCandidate {
    shape: CandidateShape,
    is_array: bool,
    optional: bool,
    allow_empty: bool,
}

impl TypeCandidate {
    fn with_shape(shape: CandidateShape) -> Self {
        Self {
            shape,
            is_array: false,
            optional: false,
            allow_empty: false,
        }
    }

    /// Signed 64-bit integer candidate.
    pub fn integer() -> Self {
        Self::with_shape(CandidateShape::Integer)
    }

    /// 64-bit float candidate.
    pub fn float() -> Self {
        Self::with_shape(CandidateShape::Float)
    }

    /// String candidate.
    pub fn string() -> Self {
        Self::with_shape(CandidateShape::String)
    }

    /// Boolean candidate.
    pub fn boolean() -> Self {
        Self::with_shape(CandidateShape::Boolean)
    }

    /// Enum candidate over `domain`.
    pub fn enumeration(domain: EnumDomain) -> Self {
        Self::with_shape(CandidateShape::Enum(domain))
    }

    /// Nested candidate with the default (derived) prefix.
    pub fn nested(decl: Arc<TypeDecl>) -> Self {
        Self::with_shape(CandidateShape::Nested {
            decl,
            prefix: Prefix::Derive,
        })
    }

    /// Nested candidate with an explicit prefix policy.
    pub fn nested_with_prefix(decl: Arc<TypeDecl>, prefix: Prefix) -> Self {
        Self::with_shape(CandidateShape::Nested { decl, prefix })
    }

    /// Parse the value as a delimited array.
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Yield an explicit "no value" instead of failing when absent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Accept blank (empty or whitespace-only) values verbatim.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// The kind of this candidate.
    pub fn kind(&self) -> Kind {
        match &self.shape {
            CandidateShape::Integer => Kind::Integer,
            CandidateShape::Float => Kind::Float,
            CandidateShape::String => Kind::String,
            CandidateShape::Boolean => Kind::Boolean,
            CandidateShape::Enum(_) => Kind::Enum,
            CandidateShape::Nested { .. } => Kind::Nested,
        }
    }

    /// Shape-specific data.
    pub fn shape(&self) -> &CandidateShape {
        &self.shape
    }

    /// Whether the candidate is in array mode.
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// Whether absence yields `Value::None`.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether blank values are accepted.
    pub fn allows_empty(&self) -> bool {
        self.allow_empty
    }

    /// Enum domain, for ENUM candidates.
    pub fn enum_domain(&self) -> Option<&EnumDomain> {
        match &self.shape {
            CandidateShape::Enum(domain) => Some(domain),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Integer.to_string(), "INTEGER");
        assert_eq!(Kind::Nested.to_string(), "NESTED");
    }

    #[test]
    fn test_empty_domain_rejected() {
        assert!(EnumDomain::from_values(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_domain_lookup_is_case_sensitive() {
        let domain = EnumDomain::new([("One", "one"), ("Two", "two")]).unwrap();
        assert_eq!(domain.find("one").unwrap().name, "One");
        assert!(domain.find("ONE").is_none());
        assert_eq!(domain.to_string(), "{\"One\": \"one\", \"Two\": \"two\"}");
    }

    #[test]
    fn test_candidate_flags() {
        let candidate = TypeCandidate::string().allow_empty();
        assert!(candidate.allows_empty());
        assert!(!candidate.is_optional());
        assert!(!candidate.is_array());
        assert!(candidate.enum_domain().is_none());
    }
}
