//! Typed extraction of resolved objects into caller structs.
//!
//! The engine produces a dynamic [`ResolvedObject`]. Types implementing
//! [`EnvConfig`] pair a declaration with a conversion out of that object, so
//! callers can write `env.load::<AppConfig>()?`.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::{Arc, LazyLock};
//! use typed_env::prelude::*;
//!
//! struct Server {
//!     host: String,
//!     ports: Vec<u16>,
//!     debug: Option<bool>,
//! }
//!
//! static SERVER: LazyLock<Arc<TypeDecl>> = LazyLock::new(|| {
//!     TypeDecl::builder("Server")
//!         .field(FieldDescriptor::new("host").candidate(TypeCandidate::string()))
//!         .field(FieldDescriptor::new("ports").candidate(TypeCandidate::integer().array()))
//!         .field(FieldDescriptor::new("debug").candidate(TypeCandidate::boolean().optional()))
//!         .build()
//! });
//!
//! impl EnvConfig for Server {
//!     fn declaration() -> Arc<TypeDecl> {
//!         Arc::clone(&SERVER)
//!     }
//!
//!     fn from_resolved(object: &ResolvedObject) -> Result<Self> {
//!         Ok(Self {
//!             host: object.extract("host")?,
//!             ports: object.extract("ports")?,
//!             debug: object.extract("debug")?,
//!         })
//!     }
//! }
//!
//! let raw = [("HOST", "localhost"), ("PORTS", "80,443")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! let server: Server = load_env_config(&raw).unwrap();
//! assert_eq!(server.ports, vec![80, 443]);
//! assert_eq!(server.debug, None);
//! ```

use crate::error::{ResolveError, Result};
use crate::schema::{EnumVariant, TypeDecl};
use crate::value::{ResolvedObject, Value};
use std::sync::Arc;

/// A configuration type with a declaration the engine can resolve.
///
/// Return the same `Arc` from every [`declaration`](Self::declaration) call
/// (a `static LazyLock` works well) so the resolver's schema cache is hit.
pub trait EnvConfig: Sized {
    /// Field declaration of this type.
    fn declaration() -> Arc<TypeDecl>;

    /// Build `Self` from an object resolved against [`declaration`](Self::declaration).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Extraction`] when a field has an unexpected shape.
    fn from_resolved(object: &ResolvedObject) -> Result<Self>;
}

/// Conversion out of a single resolved [`Value`].
pub trait FromValue: Sized {
    /// Name of the target type in extraction errors.
    const EXPECTED: &'static str;

    /// `None` when the value has another shape or does not fit.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! integer_from_value {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_value(value: &Value) -> Option<Self> {
                    value.as_i64().and_then(|v| <$ty>::try_from(v).ok())
                }
            }
        )*
    };
}

integer_from_value!(i64, i32, u16, u32, u64, usize);

impl FromValue for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "String";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for EnumVariant {
    const EXPECTED: &'static str = "enum";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Enum(variant) => Some(variant.clone()),
            _ => None,
        }
    }
}

impl FromValue for ResolvedObject {
    const EXPECTED: &'static str = "object";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_value).collect()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::None => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl ResolvedObject {
    /// Convert the field `name` into `T`.
    ///
    /// A field that was never set reads as [`Value::None`], so `Option<T>`
    /// targets extract it as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Extraction`] naming the field, `T` and the
    /// kind of value actually found.
    pub fn extract<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self.get(name).unwrap_or(&Value::None);
        T::from_value(value).ok_or_else(|| self.extraction_error(name, T::EXPECTED, value))
    }

    /// Convert the nested object under `name` into `T`.
    pub fn extract_nested<T: EnvConfig>(&self, name: &str) -> Result<T> {
        match self.get(name) {
            Some(Value::Nested(object)) => T::from_resolved(object),
            other => Err(self.extraction_error(name, "object", other.unwrap_or(&Value::None))),
        }
    }

    /// Like [`extract_nested`](Self::extract_nested) for optional nested fields.
    pub fn extract_optional_nested<T: EnvConfig>(&self, name: &str) -> Result<Option<T>> {
        match self.get(name) {
            None | Some(Value::None) => Ok(None),
            Some(_) => self.extract_nested(name).map(Some),
        }
    }

    fn extraction_error(&self, name: &str, expected: &'static str, found: &Value) -> ResolveError {
        ResolveError::Extraction {
            path: format!("{}.{}", self.type_name(), name),
            expected,
            found: found.kind_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object() -> ResolvedObject {
        ResolvedObject::builder("Config")
            .field("port", 8080i64)
            .field("negative", -1i64)
            .field("ratio", 0.5)
            .field("level", EnumVariant { name: "Two".into(), raw: "two".into() })
            .field("ports", vec![80i64, 443])
            .field("debug", Value::None)
            .seal()
    }

    #[test]
    fn test_integer_narrowing() {
        let object = object();
        assert_eq!(object.extract::<u16>("port").unwrap(), 8080);
        assert_eq!(object.extract::<i32>("negative").unwrap(), -1);

        let err = object.extract::<u16>("negative").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field Config.negative: expected u16, found integer"
        );
    }

    #[test]
    fn test_collections_and_options() {
        let object = object();
        assert_eq!(object.extract::<Vec<u16>>("ports").unwrap(), vec![80, 443]);
        assert_eq!(object.extract::<Option<bool>>("debug").unwrap(), None);
        assert_eq!(object.extract::<Option<bool>>("unset").unwrap(), None);
        assert_eq!(object.extract::<f64>("port").unwrap(), 8080.0);
        assert_eq!(object.extract::<String>("level").unwrap(), "two");
        assert_eq!(object.extract::<EnumVariant>("level").unwrap().name, "Two");
    }

    #[test]
    fn test_missing_required_field() {
        let err = object().extract::<bool>("unset").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Extraction { expected: "bool", found: "none", .. }
        ));
    }
}
