use crate::constants::{is_slug_blacklisted, is_whitespace};

pub fn trim_ws(value: &str) -> &str {
    value.trim_matches(is_whitespace)
}

pub fn trim_start_ws(value: &str) -> &str {
    value.trim_start_matches(is_whitespace)
}

pub fn trim_end_ws(value: &str) -> &str {
    value.trim_end_matches(is_whitespace)
}

/// Splits `value` into its body and the whitespace run at its end.
pub fn split_trailing_ws(value: &str) -> (&str, &str) {
    let body = trim_end_ws(value);
    (body, &value[body.len()..])
}

pub fn is_blank(value: &str) -> bool {
    value.chars().all(is_whitespace)
}

/// Byte length of the leading run of characters allowed in a bare key.
pub fn slug_len(value: &str) -> usize {
    value
        .char_indices()
        .find(|&(_, ch)| is_slug_blacklisted(ch))
        .map_or(value.len(), |(idx, _)| idx)
}

/// Byte length of a quote delimiter at the start of `value`: one
/// non-whitespace character repeated at least three times.
pub fn quote_delimiter_len(value: &str) -> Option<usize> {
    let first = value.chars().next()?;
    if is_whitespace(first) {
        return None;
    }
    let count = value.chars().take_while(|&ch| ch == first).count();
    (count >= 3).then(|| count * first.len_utf8())
}

/// Skips spaces, tabs and carriage returns, the only padding the marker
/// grammar allows between tokens on one line.
pub fn skip_padding(value: &str) -> &str {
    value.trim_start_matches([' ', '\t', '\r'])
}
