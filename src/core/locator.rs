//! Locating the raw value of a field.

use std::collections::HashMap;

/// Flat, string-keyed input of a resolution.
pub type RawMap = HashMap<String, String>;

/// Outcome of looking up a field's candidate keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located<'a> {
    /// The first candidate key present in the map and its raw value.
    Present {
        /// Key that matched
        key: &'a str,
        /// Value bound to it, untouched
        value: &'a str,
    },
    /// None of the candidate keys exists.
    Absent,
}

/// Return the value bound to the first present key, in the order given.
///
/// An empty string counts as present; blank handling belongs to the caster.
pub fn locate<'a>(raw: &'a RawMap, keys: &[String]) -> Located<'a> {
    keys.iter()
        .find_map(|key| raw.get_key_value(key.as_str()))
        .map(|(key, value)| Located::Present {
            key: key.as_str(),
            value: value.as_str(),
        })
        .unwrap_or(Located::Absent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_first_present_key_wins() {
        let map = raw(&[("FIRST1", "111"), ("FIRST2", "222"), ("FIRST3", "333")]);
        assert_eq!(
            locate(&map, &keys(&["FIRST3", "FIRST2", "FIRST1"])),
            Located::Present { key: "FIRST3", value: "333" }
        );
    }

    #[test]
    fn test_skips_missing_keys() {
        let map = raw(&[("TEST2", "hello")]);
        assert_eq!(
            locate(&map, &keys(&["TEST1", "TEST2", "TEST3"])),
            Located::Present { key: "TEST2", value: "hello" }
        );
    }

    #[test]
    fn test_empty_is_present() {
        let map = raw(&[("NAME", "")]);
        assert_eq!(
            locate(&map, &keys(&["NAME"])),
            Located::Present { key: "NAME", value: "" }
        );
    }

    #[test]
    fn test_absent() {
        assert_eq!(locate(&RawMap::new(), &keys(&["NAME"])), Located::Absent);
        assert_eq!(locate(&raw(&[("NAME", "x")]), &[]), Located::Absent);
    }
}
