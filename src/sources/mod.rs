//! Raw key/value map sources.

mod config_source;
mod env;
mod map;

pub use config_source::ConfigSource;
pub use env::EnvSource;
pub use map::MapSource;
