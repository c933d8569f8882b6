//! Field metadata: declarations, type candidates and inheritance-flattened schemas.
//!
//! Metadata is plain data produced ahead of resolution. A [`TypeDecl`] holds the
//! fields declared on one type and links to its parent; [`aggregate`] walks that
//! chain and yields the [`Schema`] the resolver works from.

mod aggregate;
mod candidate;
mod decl;
mod field;

pub use aggregate::{DEFAULT_MAX_INHERITANCE_LIMIT, Schema, SchemaField, aggregate};
pub use candidate::{CandidateShape, EnumDomain, EnumVariant, Kind, Prefix, TypeCandidate};
pub use decl::{TypeDecl, TypeDeclBuilder};
pub use field::{FieldDescriptor, FieldKey};
