//! Raw map loader that merges multiple sources.

use super::RawMap;
use crate::error::{ResolveError, Result};
use crate::sources::ConfigSource;
use tracing::debug;

/// Loads and merges raw key/value maps from multiple sources.
///
/// The loader handles precedence by sorting sources by priority and merging them
/// in order (lower priority first, higher priority sources override).
pub struct RawMapLoader {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl RawMapLoader {
    /// Create a new loader.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a source.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(source);
    }

    /// Load and merge the raw maps of all sources.
    ///
    /// Sources are merged in priority order (lowest to highest), so higher priority
    /// sources override values from lower priority sources. Sources of equal
    /// priority merge in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No source was added
    /// - Any source fails to load
    pub fn load(&self) -> Result<RawMap> {
        if self.sources.is_empty() {
            return Err(ResolveError::NoSources);
        }

        let mut merged = RawMap::new();
        for source in self.sorted() {
            let values = source.load().map_err(|e| ResolveError::Source {
                name: source.name(),
                reason: e.to_string(),
            })?;
            debug!(
                source = %source.name(),
                priority = source.priority(),
                keys = values.len(),
                "merged source"
            );
            merged.extend(values);
        }

        Ok(merged)
    }

    /// Get the list of source names in priority order.
    pub fn source_names(&self) -> Vec<String> {
        self.sorted().map(|s| s.name()).collect()
    }

    fn sorted(&self) -> impl Iterator<Item = &dyn ConfigSource> {
        // Stable sort keeps insertion order among equal priorities
        let mut sorted: Vec<_> = self.sources.iter().map(|s| s.as_ref()).collect();
        sorted.sort_by_key(|s| s.priority());
        sorted.into_iter()
    }
}

impl Default for RawMapLoader {
    fn default() -> Self {
        Self::new()
    }
}
