//! Source key naming: fallback name derivation and prefix composition.
//!
//! Field names are turned into upper-case, `_`-separated keys. Word boundaries
//! are a lower-case letter or digit followed by an upper-case letter, the last
//! capital of an acronym followed by a lower-case letter (`HTTPServer` →
//! `HTTP_SERVER`), and any of `_`, `-`, `.` or whitespace.

use crate::schema::Prefix;

/// Separator placed between a prefix and a name, and between derived words.
pub const KEY_DELIMITER: char = '_';

/// Derive the source key of a plain field name.
///
/// # Examples
///
/// ```rust
/// use typed_env::naming::derive_name;
///
/// assert_eq!(derive_name("myName"), "MY_NAME");
/// assert_eq!(derive_name("HTTPServer"), "HTTP_SERVER");
/// ```
pub fn derive_name(field: &str) -> String {
    let chars: Vec<char> = field.chars().collect();
    let mut out = String::with_capacity(field.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            push_boundary(&mut out);
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                push_boundary(&mut out);
            }
        }
        out.extend(c.to_uppercase());
    }

    while out.ends_with(KEY_DELIMITER) {
        out.pop();
    }
    out
}

fn is_separator(c: char) -> bool {
    c == KEY_DELIMITER || c == '-' || c == '.' || c.is_whitespace()
}

fn push_boundary(out: &mut String) {
    if !out.is_empty() && !out.ends_with(KEY_DELIMITER) {
        out.push(KEY_DELIMITER);
    }
}

/// Normalize an explicitly declared name or prefix.
pub fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Join a (possibly empty) prefix and a name.
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }
    let mut key = String::with_capacity(prefix.len() + name.len() + 1);
    key.push_str(prefix);
    key.push(KEY_DELIMITER);
    key.push_str(name);
    key
}

/// Candidate source keys of a field under `prefix`, in declared order.
pub fn candidate_keys(base_names: &[String], prefix: &str) -> Vec<String> {
    base_names.iter().map(|name| join(prefix, name)).collect()
}

/// Prefix handed down to a nested schema.
///
/// # Examples
///
/// ```rust
/// use typed_env::naming::child_prefix;
/// use typed_env::schema::Prefix;
///
/// assert_eq!(child_prefix("", "DEEP", &Prefix::Derive), "DEEP");
/// assert_eq!(child_prefix("APP", "DEEP", &Prefix::Derive), "APP_DEEP");
/// assert_eq!(child_prefix("APP", "DEEP", &Prefix::Custom("my".into())), "MY");
/// assert_eq!(child_prefix("APP", "DEEP", &Prefix::Disabled), "APP");
/// ```
pub fn child_prefix(parent: &str, own_name: &str, policy: &Prefix) -> String {
    match policy {
        Prefix::Derive => join(parent, own_name),
        Prefix::Custom(prefix) => normalize(prefix),
        Prefix::Disabled => parent.to_string(),
    }
}
