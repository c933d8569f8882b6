//! Inheritance-flattened schemas.

use super::{FieldDescriptor, FieldKey, TypeDecl};
use crate::error::{Result, SchemaConfigurationError};
use crate::naming;
use crate::value::Value;
use std::collections::{HashMap, HashSet};

/// Default bound on the number of types walked in one inheritance chain.
pub const DEFAULT_MAX_INHERITANCE_LIMIT: usize = 15;

/// A field of a schema with its normalized base names precomputed.
#[derive(Debug, Clone)]
pub struct SchemaField {
    owner: String,
    descriptor: FieldDescriptor,
    base_names: Vec<String>,
    default: Option<Value>,
}

impl SchemaField {
    /// Name of the type that declared the field.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The field identity.
    pub fn key(&self) -> &FieldKey {
        self.descriptor.key()
    }

    /// The declaration.
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Normalized candidate names before any prefix is applied.
    pub fn base_names(&self) -> &[String] {
        &self.base_names
    }

    /// Name the field contributes to a derived nested prefix.
    pub fn own_name(&self) -> &str {
        self.base_names.first().map(String::as_str).unwrap_or_default()
    }

    /// Declared default, or a same-named plain value of the type chain.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Merged field metadata of a type and all of its ancestors.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    depth: usize,
    fields: Vec<SchemaField>,
    values: Vec<(FieldKey, Value)>,
}

impl Schema {
    /// Display name (the most-derived type).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of types in the inheritance chain.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Fields, most-derived level first, source order within a level.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Field by key.
    pub fn field(&self, key: &FieldKey) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.key() == key)
    }

    /// Plain values that have no resolvable field of the same key.
    pub fn values(&self) -> &[(FieldKey, Value)] {
        &self.values
    }
}

/// Flatten `decl` and its ancestors into a [`Schema`].
///
/// A field declared on a more-derived type replaces a same-keyed field declared
/// closer to the root. Walking more than `limit` types is a configuration error.
///
/// # Errors
///
/// Returns a [`SchemaConfigurationError`] when the chain is too long or a field
/// declaration is malformed (symbolic key without a name, duplicate names, no
/// type candidates).
pub fn aggregate(decl: &TypeDecl, limit: usize) -> Result<Schema> {
    let mut levels: Vec<&TypeDecl> = Vec::new();
    let mut current = Some(decl);
    while let Some(level) = current {
        if levels.len() == limit {
            return Err(SchemaConfigurationError::InheritanceLimit {
                type_name: decl.name().to_string(),
                offending: level.name().to_string(),
                depth: limit + 1,
                limit,
            }
            .into());
        }
        levels.push(level);
        current = level.parent();
    }

    let mut plain: HashMap<&FieldKey, &Value> = HashMap::new();
    let mut plain_order: Vec<&FieldKey> = Vec::new();
    for level in &levels {
        for (key, value) in level.values() {
            if !plain.contains_key(key) {
                plain.insert(key, value);
                plain_order.push(key);
            }
        }
    }

    let mut seen: HashSet<&FieldKey> = HashSet::new();
    let mut fields = Vec::new();
    for level in &levels {
        for descriptor in level.fields() {
            if !seen.insert(descriptor.key()) {
                continue;
            }
            let path = format!("{}.{}", level.name(), descriptor.key());
            if descriptor.candidates().is_empty() {
                return Err(SchemaConfigurationError::NoTypeCandidates { path }.into());
            }
            let base_names = base_names(descriptor, path)?;
            let default = descriptor
                .declared_default()
                .or_else(|| plain.get(descriptor.key()).copied())
                .cloned();
            fields.push(SchemaField {
                owner: level.name().to_string(),
                descriptor: descriptor.clone(),
                base_names,
                default,
            });
        }
    }

    let values = plain_order
        .into_iter()
        .filter(|key| !seen.contains(key))
        .map(|key| (key.clone(), plain[key].clone()))
        .collect();

    Ok(Schema {
        name: decl.name().to_string(),
        depth: levels.len(),
        fields,
        values,
    })
}

fn base_names(descriptor: &FieldDescriptor, path: String) -> Result<Vec<String>> {
    if descriptor.names().is_empty() {
        return match descriptor.key() {
            FieldKey::Name(name) => Ok(vec![naming::derive_name(name)]),
            FieldKey::Symbol(_) => Err(SchemaConfigurationError::UnnamedSymbol { path }.into()),
        };
    }

    let names: Vec<String> = descriptor.names().iter().map(|name| naming::normalize(name)).collect();
    let has_duplicates = {
        let mut unique = HashSet::with_capacity(names.len());
        names.iter().any(|name| !unique.insert(name.as_str()))
    };
    if has_duplicates {
        return Err(SchemaConfigurationError::DuplicateNames { path, names }.into());
    }
    Ok(names)
}
