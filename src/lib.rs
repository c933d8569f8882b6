//! # typed-env
//!
//! Declarative, type-safe resolution of flat string maps (usually the process
//! environment) into immutable, typed configuration trees.
//!
//! ## Overview
//!
//! `typed-env` turns `HashMap<String, String>` input into structured values:
//! - Fields declare candidate key names and an ordered list of type candidates
//! - Integers, floats, booleans, strings, enums, comma-separated arrays
//! - Nested sub-configurations read under a derived key prefix
//! - Single inheritance between declarations, flattened once and cached
//! - Every source key is consumed by at most one field
//!
//! ## Quick Start
//!
//! ```rust
//! use typed_env::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let database = TypeDecl::builder("DatabaseConfig")
//!     .field(FieldDescriptor::new("url").candidate(TypeCandidate::string()))
//!     .field(FieldDescriptor::new("poolSize").candidate(TypeCandidate::integer()).default_value(10i64))
//!     .build();
//!
//! let app = TypeDecl::builder("AppConfig")
//!     .field(FieldDescriptor::new("port").candidate(TypeCandidate::integer()))
//!     .field(FieldDescriptor::new("database").candidate(TypeCandidate::nested(database)))
//!     .build();
//!
//! let env = TypedEnv::builder()
//!     .with_map([("PORT", "8080"), ("DATABASE_URL", "postgres://localhost")])
//!     .build()?;
//!
//! let config = env.resolve(&app)?;
//! assert_eq!(config.get("port"), Some(&Value::Integer(8080)));
//!
//! let database = config.get("database").and_then(Value::as_object).unwrap();
//! assert_eq!(database.get("poolSize"), Some(&Value::Integer(10)));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Naming
//!
//! Field `poolSize` nested under `database` reads `DATABASE_POOL_SIZE`. Explicit
//! names are trimmed and upper-cased; nested prefixes can be replaced or
//! disabled per candidate (see [`schema::Prefix`]).
//!
//! ## Feature Flags
//!
//! `yaml`, `toml` and `json` (all on by default) select the formats accepted
//! for resolver settings files.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod cast;
pub mod core;
pub mod error;
pub mod naming;
pub mod schema;
pub mod sources;
pub mod typed;
pub mod value;

pub use crate::core::{load_env_config, resolve};

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{Resolver, ResolverSettings, TypedEnv, TypedEnvBuilder, load_env_config, resolve};
    pub use crate::error::{ResolveError, Result};
    pub use crate::schema::{FieldDescriptor, FieldKey, Prefix, TypeCandidate, TypeDecl};
    pub use crate::typed::{EnvConfig, FromValue};
    pub use crate::value::{ResolvedObject, Value};
}
