//! Raw map source trait.

use crate::core::RawMap;
use crate::error::Result;

/// A provider of raw string key/value pairs.
///
/// Implement this trait to feed keys from somewhere other than the process
/// environment (secret stores, test fixtures, remote key/value stores).
/// Keys are expected to be upper-cased already.
pub trait ConfigSource: Send + Sync {
    /// Load the raw key/value map.
    ///
    /// The returned map is merged with other sources according to priority.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read.
    fn load(&self) -> Result<RawMap>;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> String;

    /// Priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Environment variables: 300
    /// - In-memory maps: 100
    fn priority(&self) -> i32 {
        100
    }
}
