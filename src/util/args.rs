//! Quote-aware argument splitting for event lines
//!
//! Arguments are separated by whitespace. Single- or double-quoted runs may
//! contain whitespace, and `\x` escapes `x` both inside and outside quotes.
//! Adjacent quoted and unquoted pieces join into one argument:
//!
//! ```text
//! spam 'escaping \'works\''   →  ["spam", "escaping 'works'"]
//! a"b c"d                     →  ["ab cd"]
//! ```
//!
//! Hand-written rather than built on `shlex`, which cannot report the source
//! offsets [`Arguments::raw`] slices from.

use std::ops::Index;

/// Split arguments, remembering where each one started in the source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments<'a> {
    source: &'a str,
    parts: Vec<String>,
    starts: Vec<usize>,
}

impl<'a> Arguments<'a> {
    pub fn parse(source: &'a str) -> Self {
        let mut parts = Vec::new();
        let mut starts = Vec::new();
        let mut current: Option<String> = None;
        let mut pos = 0;

        while pos < source.len() {
            let rest = &source[pos..];
            let Some(ch) = rest.chars().next() else {
                break;
            };

            if ch.is_whitespace() {
                if let Some(arg) = current.take() {
                    parts.push(arg);
                }
                pos += ch.len_utf8();
                continue;
            }

            let (piece, len) = match quoted_len(rest) {
                Some(len) => (unquote(&rest[..len]), len),
                None => {
                    let len = plain_len(rest);
                    (unescape(&rest[..len]), len)
                }
            };

            match current.as_mut() {
                Some(arg) => arg.push_str(&piece),
                None => {
                    starts.push(pos);
                    current = Some(piece);
                }
            }
            pos += len;
        }

        if let Some(arg) = current {
            parts.push(arg);
        }

        Self {
            source,
            parts,
            starts,
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.parts.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(String::as_str)
    }

    /// The untouched source text from argument `from` to the end of the line
    pub fn raw(&self, from: usize) -> &'a str {
        match self.starts.get(from) {
            Some(&start) => self.source[start..].trim_end(),
            None => "",
        }
    }
}

impl Index<usize> for Arguments<'_> {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.parts[index]
    }
}

/// Length of a quoted run at the start of `s`, including both quotes
fn quoted_len(s: &str) -> Option<usize> {
    let quote = s.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let mut escaped = false;
    for (idx, ch) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return Some(idx + ch.len_utf8());
        }
    }
    None
}

/// Length of an unquoted run: up to whitespace or a quote that closes
fn plain_len(s: &str) -> usize {
    let mut first = true;
    for (idx, ch) in s.char_indices() {
        if ch.is_whitespace() {
            return idx;
        }
        if !first && (ch == '"' || ch == '\'') && quoted_len(&s[idx..]).is_some() {
            return idx;
        }
        first = false;
    }
    s.len()
}

/// True when `s` is wrapped in a matching pair of single or double quotes
pub fn is_quoted(s: &str) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => first == last && (first == '"' || first == '\''),
        _ => false,
    }
}

/// Strip surrounding quotes (if any) and resolve backslash escapes
pub fn unquote(s: &str) -> String {
    if is_quoted(s) {
        unescape(&s[1..s.len() - 1])
    } else {
        unescape(s)
    }
}

/// Replace every `\x` with `x`
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
