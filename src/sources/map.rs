//! In-memory source.

use super::ConfigSource;
use crate::core::RawMap;
use crate::error::Result;

/// A fixed, in-memory key/value map.
///
/// # Examples
///
/// ```rust
/// use typed_env::sources::{ConfigSource, MapSource};
///
/// let source = MapSource::new("defaults")
///     .with_value("PORT", "8080")
///     .with_value("HOST", "localhost");
/// assert_eq!(source.load().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MapSource {
    name: String,
    values: RawMap,
    priority: i32,
}

impl MapSource {
    /// Create an empty map source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: RawMap::new(),
            priority: 100,
        }
    }

    /// Create a source from existing pairs.
    pub fn from_pairs<I, K, V>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut source = Self::new(name);
        source
            .values
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        source
    }

    /// Add one pair.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ConfigSource for MapSource {
    fn load(&self) -> Result<RawMap> {
        Ok(self.values.clone())
    }

    fn name(&self) -> String {
        format!("map:{}", self.name)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let source = MapSource::from_pairs("fixture", [("NAME", "car"), ("DEEP_NAME", "111")]);
        let map = source.load().unwrap();
        assert_eq!(map.get("DEEP_NAME").map(String::as_str), Some("111"));
        assert_eq!(source.name(), "map:fixture");
        assert_eq!(source.priority(), 100);
    }
}
