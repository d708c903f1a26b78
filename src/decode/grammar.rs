//! Ordered line grammar.
//!
//! A line is matched against the shapes below in a fixed priority order and
//! the first match wins: quote terminator, quoted text, comment, directive,
//! skipped text, key start, array element, scope marker, and finally plain
//! text. The order is load-bearing: a quote or a skip changes how every
//! following line is read, and key starts must be tried before elements and
//! markers because a bare key can resemble either.

use crate::constants::{
    is_whitespace, DIRECTIVE_END, DIRECTIVE_ENDSKIP, DIRECTIVE_IGNORE, DIRECTIVE_SKIP,
};
use crate::text::string::{quote_delimiter_len, skip_padding, slug_len, trim_start_ws};

use super::scope::{ScopeFlags, ScopeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    End,
    Skip,
    EndSkip,
    Ignore,
}

impl Directive {
    pub fn from_word(word: &str) -> Option<Self> {
        [
            (DIRECTIVE_END, Directive::End),
            (DIRECTIVE_SKIP, Directive::Skip),
            (DIRECTIVE_ENDSKIP, Directive::EndSkip),
            (DIRECTIVE_IGNORE, Directive::Ignore),
        ]
        .into_iter()
        .find(|(name, _)| word.eq_ignore_ascii_case(name))
        .map(|(_, directive)| directive)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Directive::End => DIRECTIVE_END,
            Directive::Skip => DIRECTIVE_SKIP,
            Directive::EndSkip => DIRECTIVE_ENDSKIP,
            Directive::Ignore => DIRECTIVE_IGNORE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    QuoteEnd,
    QuotedText(&'a str),
    Comment,
    Directive(Directive),
    UnknownDirective(&'a str),
    SkippedText(&'a str),
    KeyStart {
        key: &'a str,
        quote: Option<&'a str>,
        rest: &'a str,
    },
    ArrayElement(&'a str),
    ScopeOpen {
        kind: ScopeKind,
        flags: ScopeFlags,
        name: &'a str,
    },
    ScopeClose(ScopeKind),
    Text(&'a str),
}

/// Parser state the grammar needs to pick between competing shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineContext<'q> {
    pub quote: Option<&'q str>,
    pub skipping: bool,
    pub keep_comments: bool,
    /// False while the innermost scope is a simple array.
    pub keys_allowed: bool,
    /// True while the innermost scope is an array that accepts `*` lines.
    pub elements_allowed: bool,
}

pub fn classify<'a>(line: &'a str, ctx: &LineContext<'_>) -> LineKind<'a> {
    if let Some(quote) = ctx.quote {
        if line == quote {
            return LineKind::QuoteEnd;
        }
        return LineKind::QuotedText(line);
    }
    if !ctx.keep_comments && is_comment(line) {
        return LineKind::Comment;
    }
    if let Some((word, padded)) = directive_word(line) {
        match Directive::from_word(word) {
            Some(directive) => return LineKind::Directive(directive),
            None if ctx.skipping => return LineKind::SkippedText(line),
            // `: word` reads as prose; only `:word` claims directive syntax.
            None if padded => {}
            None => return LineKind::UnknownDirective(word),
        }
    }
    if ctx.skipping {
        return LineKind::SkippedText(line);
    }
    if ctx.keys_allowed {
        if let Some(kind) = key_start(line) {
            return kind;
        }
    }
    if ctx.elements_allowed {
        if let Some(rest) = array_element(line) {
            return LineKind::ArrayElement(rest);
        }
    }
    if let Some(kind) = scope_marker(line) {
        return kind;
    }
    LineKind::Text(line)
}

fn is_comment(line: &str) -> bool {
    trim_start_ws(line).starts_with('#')
}

/// `:` then optional padding then a word that starts with an ASCII letter
/// and runs to the next whitespace, so `:end2` is one word, not `:end`.
/// The flag reports whether padding separated the colon from the word.
fn directive_word(line: &str) -> Option<(&str, bool)> {
    let after_colon = line.strip_prefix(':')?;
    let after = skip_padding(after_colon);
    if !after.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
        return None;
    }
    let len = after.find(is_whitespace).unwrap_or(after.len());
    Some((&after[..len], after.len() != after_colon.len()))
}

fn key_start(line: &str) -> Option<LineKind<'_>> {
    let key_len = slug_len(line);
    if key_len == 0 {
        return None;
    }
    let key = &line[..key_len];
    let after_colon = skip_padding(&line[key_len..]).strip_prefix(':')?;
    match quote_delimiter_len(after_colon) {
        Some(quote_len) => Some(LineKind::KeyStart {
            key,
            quote: Some(&after_colon[..quote_len]),
            rest: &after_colon[quote_len..],
        }),
        None => Some(LineKind::KeyStart {
            key,
            quote: None,
            rest: skip_padding(after_colon),
        }),
    }
}

fn array_element(line: &str) -> Option<&str> {
    let after_star = trim_start_ws(line).strip_prefix('*')?;
    Some(skip_padding(after_star))
}

fn scope_marker(line: &str) -> Option<LineKind<'_>> {
    let mut chars = line.chars();
    let kind = match chars.next()? {
        '[' => ScopeKind::Array,
        '{' => ScopeKind::Object,
        _ => return None,
    };
    let body = skip_padding(chars.as_str());
    let flags_len = body
        .bytes()
        .take_while(|byte| matches!(byte, b'+' | b'.'))
        .count();
    let flags = ScopeFlags::parse(&body[..flags_len]);
    let body = skip_padding(&body[flags_len..]);
    let name_len = slug_len(body);
    let name = &body[..name_len];
    let closer = skip_padding(&body[name_len..]);
    if !closer.starts_with([']', '}']) {
        return None;
    }
    if name.is_empty() {
        Some(LineKind::ScopeClose(kind))
    } else {
        Some(LineKind::ScopeOpen { kind, flags, name })
    }
}
