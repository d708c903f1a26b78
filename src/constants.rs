pub const MAX_DEPTH: usize = 256;

/// Characters treated as whitespace by every part of the grammar.
pub const WHITESPACE: &[char] = &[
    '\u{0000}', '\u{0009}', '\u{000A}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{0020}',
    '\u{00A0}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}',
    '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{200B}', '\u{2028}',
    '\u{2029}', '\u{202F}', '\u{205F}', '\u{3000}', '\u{FEFF}',
];

pub const DIRECTIVE_END: &str = "end";
pub const DIRECTIVE_SKIP: &str = "skip";
pub const DIRECTIVE_ENDSKIP: &str = "endskip";
pub const DIRECTIVE_IGNORE: &str = "ignore";

pub(crate) const FREEFORM_TYPE_KEY: &str = "type";
pub(crate) const FREEFORM_VALUE_KEY: &str = "value";
pub(crate) const FREEFORM_TEXT_TYPE: &str = "text";

#[inline]
pub fn is_whitespace(ch: char) -> bool {
    match ch {
        ' ' | '\t' | '\n' | '\r' => true,
        _ if ch.is_ascii() => matches!(ch, '\u{0000}' | '\u{000B}' | '\u{000C}'),
        _ => WHITESPACE.contains(&ch),
    }
}

/// Characters that may not appear in a bare key or scope name.
#[inline]
pub fn is_slug_blacklisted(ch: char) -> bool {
    is_whitespace(ch) || matches!(ch, '[' | ']' | '{' | '}' | '\\' | ':')
}
