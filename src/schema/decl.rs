//! Type declarations: the materialized metadata of one configuration type.

use super::{FieldDescriptor, FieldKey};
use crate::value::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DECL_ID: AtomicU64 = AtomicU64::new(1);

/// Field metadata declared directly on one type, plus a link to its parent type.
///
/// A declaration is immutable once built and is shared behind an `Arc`; its
/// identity keys the resolver's schema cache.
///
/// # Examples
///
/// ```rust
/// use typed_env::schema::{FieldDescriptor, TypeCandidate, TypeDecl};
///
/// let base = TypeDecl::builder("Base")
///     .field(FieldDescriptor::new("name").candidate(TypeCandidate::string()))
///     .build();
///
/// let main = TypeDecl::builder("Main")
///     .extends(base)
///     .field(FieldDescriptor::new("age").candidate(TypeCandidate::integer()))
///     .build();
///
/// assert_eq!(main.parent().unwrap().name(), "Base");
/// ```
#[derive(Debug)]
pub struct TypeDecl {
    id: u64,
    name: String,
    parent: Option<Arc<TypeDecl>>,
    fields: Vec<FieldDescriptor>,
    values: Vec<(FieldKey, Value)>,
}

impl TypeDecl {
    /// Start declaring a type named `name`.
    pub fn builder(name: impl Into<String>) -> TypeDeclBuilder {
        TypeDeclBuilder {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Process-unique identity of this declaration.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name used in field paths.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration this type extends.
    pub fn parent(&self) -> Option<&TypeDecl> {
        self.parent.as_deref()
    }

    /// Fields declared at this level, in source order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Undecorated values declared at this level.
    pub fn values(&self) -> &[(FieldKey, Value)] {
        &self.values
    }
}

/// Builder for [`TypeDecl`].
pub struct TypeDeclBuilder {
    name: String,
    parent: Option<Arc<TypeDecl>>,
    fields: Vec<FieldDescriptor>,
    values: Vec<(FieldKey, Value)>,
}

impl TypeDeclBuilder {
    /// Inherit the fields of `parent`.
    pub fn extends(mut self, parent: Arc<TypeDecl>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Declare a resolvable field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a plain value that is copied into every result as-is.
    pub fn value(mut self, key: impl Into<FieldKey>, value: impl Into<Value>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> Arc<TypeDecl> {
        Arc::new(TypeDecl {
            id: NEXT_DECL_ID.fetch_add(1, Ordering::Relaxed),
            name: self.name,
            parent: self.parent,
            fields: self.fields,
            values: self.values,
        })
    }
}
