//! Argument substitution into command templates

use crate::util::escape_chars;

/// Characters escaped inside a `%r` substitution
const RAW_ESCAPES: [char; 4] = ['\\', '\'', '"', '@'];

/// Substitute captured arguments into a command template
///
/// - `%s` becomes the arguments joined by spaces
/// - `%r` becomes the same text single-quoted with `\ ' " @` escaped
/// - `%N` (1-based) becomes the Nth argument
///
/// The template is scanned once, left to right, so text coming from an
/// argument is never read as a token. A positional token takes the whole
/// digit run (`%12` is the twelfth argument, not `%1` then `2`). Tokens
/// without a matching argument are left as written.
pub fn expand(template: &str, args: &[String]) -> String {
    if !template.contains('%') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(at) = rest.find('%') {
        out.push_str(&rest[..at]);
        let after = &rest[at + 1..];

        if let Some(tail) = after.strip_prefix('s') {
            out.push_str(&args.join(" "));
            rest = tail;
        } else if let Some(tail) = after.strip_prefix('r') {
            out.push('\'');
            out.push_str(&escape_chars(&args.join(" "), &RAW_ESCAPES));
            out.push('\'');
            rest = tail;
        } else {
            let digits = after
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after.len());
            let arg = after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| args.get(index));

            match arg {
                Some(arg) => out.push_str(arg),
                None => {
                    out.push('%');
                    out.push_str(&after[..digits]);
                }
            }
            rest = &after[digits..];
        }
    }

    out.push_str(rest);
    out
}
