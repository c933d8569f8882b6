//! Escape-aware splitting of delimited array values.

/// Separator between array elements.
pub const ARRAY_DELIMITER: char = ',';

/// Character that escapes a following delimiter.
pub const ESCAPE: char = '\\';

/// Split `raw` on unescaped delimiters.
///
/// A run of escapes in front of a delimiter collapses pairwise into literal
/// backslashes; an odd one left over escapes the delimiter itself. Escapes
/// anywhere else are kept verbatim. An empty input yields one empty element.
///
/// # Examples
///
/// ```rust
/// use typed_env::cast::split;
///
/// assert_eq!(split("a,b,c"), vec!["a", "b", "c"]);
/// assert_eq!(split(r"Ivan\,First,Petro\,Second"), vec!["Ivan,First", "Petro,Second"]);
/// assert_eq!(split(r"Ivan\\,First,Petro\,Second"), vec![r"Ivan\", "First", "Petro,Second"]);
/// ```
pub fn split(raw: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut escapes = 0usize;

    for c in raw.chars() {
        if c == ESCAPE {
            escapes += 1;
            continue;
        }
        if c == ARRAY_DELIMITER {
            push_escapes(&mut current, escapes / 2);
            if escapes % 2 == 1 {
                current.push(ARRAY_DELIMITER);
            } else {
                items.push(std::mem::take(&mut current));
            }
        } else {
            push_escapes(&mut current, escapes);
            current.push(c);
        }
        escapes = 0;
    }

    push_escapes(&mut current, escapes);
    items.push(current);
    items
}

fn push_escapes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(ESCAPE, count));
}
