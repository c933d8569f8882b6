//! Attributable field paths.

use crate::schema::FieldKey;
use std::fmt;

/// Location of a field inside a resolution tree.
///
/// Each segment is `Owner.field`, where `Owner` is the type that declared the
/// field; nesting is rendered with ` -> `, e.g. `Config.my -> Nested.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The empty path above a top-level schema.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of `field` declared on `owner`, below `self`.
    pub fn child(&self, owner: &str, field: &FieldKey) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(format!("{}.{}", owner, field));
        Self { segments }
    }

    /// `Owner.field` segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.segments.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_rendering() {
        let path = FieldPath::root()
            .child("Config", &FieldKey::from("my"))
            .child("Nested", &FieldKey::from("name"));
        assert_eq!(path.to_string(), "Config.my -> Nested.name");
        assert_eq!(path.segments().len(), 2);
    }

    #[test]
    fn test_symbol_segment() {
        let path = FieldPath::root().child("Config", &FieldKey::symbol("Env Symbol"));
        assert_eq!(path.to_string(), "Config.Symbol(Env Symbol)");
        assert!(FieldPath::root().is_root());
    }
}
