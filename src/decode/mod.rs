pub mod buffer;
pub mod grammar;
pub mod scan;
pub mod scope;

use std::io::BufRead;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::arena::{Arena, NodeId};
use crate::constants::{FREEFORM_TEXT_TYPE, FREEFORM_TYPE_KEY, FREEFORM_VALUE_KEY, MAX_DEPTH};
use crate::text::string::{is_blank, trim_ws};
use crate::{DecodeOptions, Error, Result};

use buffer::Buffer;
use grammar::{classify, Directive, LineContext, LineKind};
use scan::{scan_lines, strip_terminator};
use scope::{ArrayShape, ArrayState, ScopeFlags, ScopeFrame, ScopeKind, ScopeStack};

pub fn load<I, S>(lines: I, options: &DecodeOptions) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut decoder = Decoder::new(options);
    for (idx, line) in lines.into_iter().enumerate() {
        decoder.feed(strip_terminator(line.as_ref()), idx + 1)?;
        if decoder.is_done() {
            break;
        }
    }
    decoder.finish()
}

pub fn loads(input: &str, options: &DecodeOptions) -> Result<Value> {
    let mut decoder = Decoder::new(options);
    for line in scan_lines(input) {
        decoder.feed(line.content, line.number)?;
        if decoder.is_done() {
            break;
        }
    }
    decoder.finish()
}

pub fn load_reader<R: BufRead>(reader: R, options: &DecodeOptions) -> Result<Value> {
    let mut decoder = Decoder::new(options);
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| Error::from(err).at_line(idx + 1))?;
        decoder.feed(&line, idx + 1)?;
        if decoder.is_done() {
            break;
        }
    }
    decoder.finish()
}

pub fn from_str<T: DeserializeOwned>(input: &str, options: &DecodeOptions) -> Result<T> {
    let value = loads(input, options)?;
    serde_json::from_value(value)
        .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8], options: &DecodeOptions) -> Result<T> {
    let text =
        std::str::from_utf8(input).map_err(|err| Error::utf8(format!("invalid utf-8: {err}")))?;
    from_str(text, options)
}

pub fn from_reader<T: DeserializeOwned, R: BufRead>(reader: R, options: &DecodeOptions) -> Result<T> {
    let value = load_reader(reader, options)?;
    serde_json::from_value(value)
        .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
}

pub fn validate_str(input: &str, options: &DecodeOptions) -> Result<()> {
    loads(input, options).map(|_| ())
}

#[derive(Debug)]
struct OpenQuote {
    delimiter: String,
    line: usize,
}

/// State of one parse: the document arena, the current scope, the open
/// scope frames and the value being buffered.
struct Decoder {
    arena: Arena,
    scope: NodeId,
    stack: ScopeStack,
    buffer: Buffer,
    quote: Option<OpenQuote>,
    skipping: bool,
    done: bool,
    keep_comments: bool,
}

impl Decoder {
    fn new(options: &DecodeOptions) -> Self {
        let arena = Arena::new();
        let scope = arena.root();
        Self {
            arena,
            scope,
            stack: ScopeStack::new(),
            buffer: Buffer::new(),
            quote: None,
            skipping: false,
            done: false,
            keep_comments: options.comments,
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn feed(&mut self, line: &str, number: usize) -> Result<()> {
        let ctx = LineContext {
            quote: self.quote.as_ref().map(|quote| quote.delimiter.as_str()),
            skipping: self.skipping,
            keep_comments: self.keep_comments,
            keys_allowed: self.stack.keys_allowed(),
            elements_allowed: self.stack.elements_allowed(),
        };
        match classify(line, &ctx) {
            LineKind::QuoteEnd => self.close_quote(),
            LineKind::QuotedText(text) | LineKind::SkippedText(text) => {
                self.buffer.push_line(text)
            }
            LineKind::Comment => {}
            LineKind::Directive(directive) => self.directive(directive, number),
            LineKind::UnknownDirective(word) => {
                return Err(Error::unknown_directive(word).at_line(number));
            }
            LineKind::KeyStart { key, quote, rest } => {
                self.start_key(key, rest)
                    .map_err(|err| err.at_line(number))?;
                if let Some(delimiter) = quote {
                    self.quote = Some(OpenQuote {
                        delimiter: delimiter.to_string(),
                        line: number,
                    });
                }
            }
            LineKind::ArrayElement(rest) => {
                self.array_element(rest).map_err(|err| err.at_line(number))?;
            }
            LineKind::ScopeOpen { kind, flags, name } => {
                self.open_scope(kind, flags, name)
                    .map_err(|err| err.at_line(number))?;
            }
            LineKind::ScopeClose(kind) => {
                self.close_scope(kind).map_err(|err| err.at_line(number))?;
            }
            LineKind::Text(text) => self.text(text).map_err(|err| err.at_line(number))?,
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Value> {
        if let Some(quote) = &self.quote {
            return Err(Error::unterminated_quote(&quote.delimiter).at_line(quote.line));
        }
        self.end();
        Ok(self.arena.into_value())
    }

    fn end(&mut self) {
        self.buffer.flush(&mut self.arena, self.quote.is_some());
    }

    fn close_quote(&mut self) {
        self.buffer.close_quote();
        self.end();
        self.quote = None;
    }

    fn directive(&mut self, directive: Directive, number: usize) {
        debug!(directive = directive.as_str(), line = number, skipping = self.skipping, "directive");
        if self.skipping && !matches!(directive, Directive::EndSkip | Directive::Ignore) {
            self.end();
            return;
        }
        match directive {
            Directive::End => self.end(),
            Directive::Skip => {
                self.end();
                self.skipping = true;
            }
            Directive::EndSkip => {
                self.skipping = false;
                self.buffer.discard();
            }
            Directive::Ignore => {
                self.end();
                self.done = true;
                debug!(line = number, "stopping at :ignore");
            }
        }
    }

    fn start_key(&mut self, key: &str, rest: &str) -> Result<()> {
        self.end();
        self.enter_array_element(key)?;
        let target = if self.in_freeform_array() {
            self.bind_string(FREEFORM_VALUE_KEY, false)?
        } else {
            self.bind_string(key, true)?
        };
        self.buffer.start(&mut self.arena, target, rest);
        Ok(())
    }

    fn array_element(&mut self, rest: &str) -> Result<()> {
        self.end();
        let Some(array) = self.stack.top_mut().and_then(|frame| frame.array.as_mut()) else {
            return Ok(());
        };
        if array.shape.settle(ArrayShape::Simple) {
            debug!(shape = ?array.shape, "array shape settled");
        }
        let slot = self.arena.new_string("");
        self.arena.push_element(array.node, slot)?;
        self.buffer.start(&mut self.arena, slot, rest);
        Ok(())
    }

    fn text(&mut self, line: &str) -> Result<()> {
        if self.in_freeform_array() && !is_blank(line) {
            if let Some(array) = self.top_array() {
                let element = self.arena.new_object();
                self.arena.push_element(array, element)?;
                let kind = self.arena.new_string(FREEFORM_TEXT_TYPE);
                self.arena.set_field(element, FREEFORM_TYPE_KEY, kind)?;
                let value = self.arena.new_string(trim_ws(line));
                self.arena.set_field(element, FREEFORM_VALUE_KEY, value)?;
            }
            return Ok(());
        }
        self.buffer.push_line(line);
        Ok(())
    }

    fn open_scope(&mut self, kind: ScopeKind, flags: ScopeFlags, name: &str) -> Result<()> {
        self.end();
        let in_freeform = flags.nested && self.in_freeform_array();
        if flags.nested {
            self.enter_array_element(name)?;
        } else {
            self.scope = self.arena.root();
        }

        // Inside a freeform array the name is the element's type tag and
        // the new scope hangs off its `value` field.
        let (holder, key) = if in_freeform {
            (self.scope, FREEFORM_VALUE_KEY)
        } else {
            self.resolve_path(self.scope, name)?
        };

        let parent = self.scope;
        let frame = match kind {
            ScopeKind::Array => {
                let node = self.arena.new_array();
                self.arena.set_field(holder, key, node)?;
                ScopeFrame {
                    array: Some(ArrayState::new(node, flags.freeform)),
                    flags,
                    parent,
                }
            }
            ScopeKind::Object => {
                self.scope = self.arena.ensure_object(holder, key)?;
                ScopeFrame {
                    array: None,
                    flags,
                    parent,
                }
            }
        };
        debug!(?kind, ?flags, scope = name, depth = self.stack.depth(), "open scope");
        if flags.nested {
            self.stack.push(frame)
        } else {
            self.stack.reset(frame);
            Ok(())
        }
    }

    fn close_scope(&mut self, kind: ScopeKind) -> Result<()> {
        self.end();
        let frame = self.stack.pop()?;
        debug!(?kind, depth = self.stack.depth(), "close scope");
        self.scope = frame.parent;
        Ok(())
    }

    /// Starts a new element of the innermost complex or freeform array
    /// when `key` calls for one, and makes it the current scope. A key in
    /// an untyped array settles it as complex.
    fn enter_array_element(&mut self, key: &str) -> Result<()> {
        let Some(array) = self.stack.top_mut().and_then(|frame| frame.array.as_mut()) else {
            return Ok(());
        };
        if array.shape.settle(ArrayShape::Complex) {
            debug!(shape = ?array.shape, first_key = key, "array shape settled");
        }
        if !array.starts_element(key) {
            return Ok(());
        }
        let element = self.arena.new_object();
        self.arena.push_element(array.node, element)?;
        if array.shape == ArrayShape::Freeform {
            let kind = self.arena.new_string(key);
            self.arena.set_field(element, FREEFORM_TYPE_KEY, kind)?;
        }
        self.scope = element;
        Ok(())
    }

    fn in_freeform_array(&self) -> bool {
        self.stack.top().is_some_and(ScopeFrame::is_freeform_array)
    }

    fn top_array(&self) -> Option<NodeId> {
        self.stack
            .top()
            .and_then(|frame| frame.array.as_ref())
            .map(|array| array.node)
    }

    /// Binds an empty string at `key` in the current scope and returns it
    /// as the buffer's target.
    fn bind_string(&mut self, key: &str, split: bool) -> Result<NodeId> {
        let (holder, leaf) = if split {
            self.resolve_path(self.scope, key)?
        } else {
            (self.scope, key)
        };
        let node = self.arena.new_string("");
        self.arena.set_field(holder, leaf, node)?;
        Ok(node)
    }

    /// Walks the dotted `path` from `scope`, creating mappings for every
    /// segment but the last, and returns the mapping that holds the last.
    fn resolve_path<'k>(&mut self, scope: NodeId, path: &'k str) -> Result<(NodeId, &'k str)> {
        let mut holder = scope;
        let mut segments = path.split('.');
        let mut leaf = segments.next().unwrap_or(path);
        for (depth, segment) in segments.enumerate() {
            if depth >= MAX_DEPTH {
                return Err(Error::depth_limit(MAX_DEPTH));
            }
            holder = self.arena.ensure_object(holder, leaf)?;
            leaf = segment;
        }
        Ok((holder, leaf))
    }
}
