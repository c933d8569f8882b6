//! Resolution engine, raw map loading and the `TypedEnv` handle.

mod builder;
mod context;
mod loader;
mod locator;
mod path;
mod resolver;
mod settings;
mod tracker;

pub use builder::{TypedEnv, TypedEnvBuilder};
pub use loader::RawMapLoader;
pub use locator::{Located, RawMap, locate};
pub use path::FieldPath;
pub use resolver::{Resolver, load_env_config, resolve};
pub use settings::{ResolverSettings, SETTINGS_ENV_PREFIX};
pub use tracker::{Checkpoint, CollisionTracker};
