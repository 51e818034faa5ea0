//! Escaping helpers for display values and expanded commands

/// Prefix every occurrence of the given characters with a backslash
pub fn escape_chars(s: &str, chars: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if chars.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Wrap text in the `@[...]@` verbatim markers used by display variables
///
/// Empty text produces an empty string so that no markers are emitted.
pub fn display_escape(s: &str) -> String {
    if s.is_empty() {
        String::new()
    } else {
        format!("@[{}]@", escape_chars(s, &['\\', '@']))
    }
}
