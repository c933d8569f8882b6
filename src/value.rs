//! Resolved values and the sealed result tree.

use crate::schema::{EnumVariant, FieldKey};
use std::collections::BTreeMap;

/// A resolved field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit "no value" for an optional field that was absent
    None,
    /// INTEGER candidate
    Integer(i64),
    /// FLOAT candidate
    Float(f64),
    /// BOOLEAN candidate
    Boolean(bool),
    /// STRING candidate
    String(String),
    /// ENUM candidate
    Enum(EnumVariant),
    /// Any candidate in array mode
    Array(Vec<Value>),
    /// NESTED candidate
    Nested(ResolvedObject),
}

impl Value {
    /// Short name of the variant, used in extraction errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::String(_) => "string",
            Self::Enum(_) => "enum",
            Self::Array(_) => "array",
            Self::Nested(_) => "object",
        }
    }

    /// Whether this is the explicit "no value" marker.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Integer payload.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Float payload; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Boolean payload.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// String payload; enum variants yield their raw representation.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Enum(variant) => Some(&variant.raw),
            _ => None,
        }
    }

    /// Array payload.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Nested object payload.
    pub fn as_object(&self) -> Option<&ResolvedObject> {
        match self {
            Self::Nested(object) => Some(object),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<EnumVariant> for Value {
    fn from(variant: EnumVariant) -> Self {
        Self::Enum(variant)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<ResolvedObject> for Value {
    fn from(object: ResolvedObject) -> Self {
        Self::Nested(object)
    }
}

/// Immutable result of resolving one schema level.
///
/// There is no way to change a field once the object is sealed; nested levels
/// are sealed before they are attached to their parent.
///
/// # Examples
///
/// ```rust
/// use typed_env::value::{ResolvedObject, Value};
///
/// let deep = ResolvedObject::builder("NestedConfig").field("name", 111i64).seal();
/// let config = ResolvedObject::builder("Config")
///     .field("name", "car")
///     .field("deep", deep)
///     .seal();
///
/// assert_eq!(config.get("name"), Some(&Value::from("car")));
/// assert_eq!(config.get("deep").and_then(Value::as_object).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedObject {
    type_name: String,
    fields: BTreeMap<FieldKey, Value>,
}

impl ResolvedObject {
    /// Start assembling an object of type `type_name`.
    pub fn builder(type_name: impl Into<String>) -> ObjectBuilder {
        ObjectBuilder {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Name of the schema this object was resolved from.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Value of a plainly named field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(&FieldKey::Name(name.to_string()))
    }

    /// Value of any field, including symbolic ones.
    pub fn get_key(&self, key: &FieldKey) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether the field exists.
    pub fn contains(&self, key: &FieldKey) -> bool {
        self.fields.contains_key(key)
    }

    /// Fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &Value)> {
        self.fields.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Write side of a [`ResolvedObject`]; consumed by [`ObjectBuilder::seal`].
#[derive(Debug)]
pub struct ObjectBuilder {
    type_name: String,
    fields: BTreeMap<FieldKey, Value>,
}

impl ObjectBuilder {
    /// Set a field, chaining.
    pub fn field(mut self, key: impl Into<FieldKey>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field in place. A later write to the same key replaces the earlier one.
    pub fn insert(&mut self, key: impl Into<FieldKey>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Freeze the object.
    pub fn seal(self) -> ResolvedObject {
        ResolvedObject {
            type_name: self.type_name,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let build = || {
            ResolvedObject::builder("Config")
                .field("name", "car")
                .field("ports", vec![80i64, 443])
                .seal()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_insert_replaces() {
        let mut builder = ResolvedObject::builder("Config");
        builder.insert("port", 1i64);
        builder.insert("port", 2i64);
        let object = builder.seal();
        assert_eq!(object.get("port").and_then(Value::as_i64), Some(2));
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn test_symbol_lookup() {
        let key = FieldKey::symbol("Env Symbol");
        let object = ResolvedObject::builder("Config").field(key.clone(), 345i64).seal();
        assert_eq!(object.get_key(&key), Some(&Value::Integer(345)));
        assert!(object.get("Env Symbol").is_none());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("x").as_i64(), None);
        assert!(Value::None.is_none());
        assert_eq!(Value::from(vec![true, false]).as_array().map(<[Value]>::len), Some(2));
    }
}
