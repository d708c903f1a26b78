use std::borrow::Cow;

use tracing::trace;

use crate::arena::{Arena, NodeId};
use crate::text::string::{split_trailing_ws, trim_end_ws, trim_start_ws};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// First line of a value, taken from a key, element or quote line.
    Replace,
    /// Continuation text.
    Append,
}

/// Hook for per-line escape handling. Both modes currently pass text
/// through unchanged; continuation lines are where leading `: [ { * \`
/// escapes would be undone.
pub fn format_value(value: &str, mode: FormatMode) -> Cow<'_, str> {
    match mode {
        FormatMode::Replace | FormatMode::Append => Cow::Borrowed(value),
    }
}

/// Text accumulated for the value being read. At most one value is open
/// at a time; its target is a string node already bound in the tree.
#[derive(Debug, Default)]
pub struct Buffer {
    target: Option<NodeId>,
    text: String,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the buffer for `target` and writes the trimmed first line into
    /// it. The line's trailing whitespace stays pending so continuation
    /// lines join onto it.
    pub fn start(&mut self, arena: &mut Arena, target: NodeId, first_line: &str) {
        self.text.clear();
        self.text.push_str(first_line);
        self.text.push('\n');
        let trailing = {
            let formatted = format_value(&self.text, FormatMode::Replace);
            let (body, trailing) = split_trailing_ws(trim_start_ws(&formatted));
            arena.append_str(target, body);
            trailing.to_string()
        };
        self.text = trailing;
        self.target = Some(target);
    }

    /// Disarms the buffer and drops pending text without writing it.
    pub fn discard(&mut self) {
        if !self.text.is_empty() {
            trace!(discarded = ?self.text, "discard buffer");
        }
        self.text.clear();
        self.target = None;
    }

    pub fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Drops the line break that precedes a closing quote delimiter.
    pub fn close_quote(&mut self) {
        if self.text.ends_with('\n') {
            self.text.pop();
        }
    }

    /// Appends pending text to the target and disarms the buffer. Without
    /// a target the text is discarded. Quoted text keeps its trailing
    /// whitespace.
    pub fn flush(&mut self, arena: &mut Arena, quoted: bool) {
        let text = std::mem::take(&mut self.text);
        match self.target.take() {
            Some(target) => {
                let formatted = format_value(&text, FormatMode::Append);
                let value = if quoted {
                    formatted.as_ref()
                } else {
                    trim_end_ws(&formatted)
                };
                trace!(target_node = ?target, flushed = ?value, "flush buffer");
                arena.append_str(target, value);
            }
            None if !text.is_empty() => {
                trace!(discarded = ?text, "flush buffer without target");
            }
            None => {}
        }
    }
}
