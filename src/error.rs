use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input ended while a quoted literal was still open.
    UnterminatedQuote,
    /// A `[]` or `{}` marker appeared with no open scope to close.
    UnbalancedScopeClose,
    /// A `:word` line whose word is not a known directive.
    UnknownDirective,
    /// Scope nesting or a dotted key path went past `MAX_DEPTH`.
    DepthLimit,
    Io,
    Utf8,
    Deserialize,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnterminatedQuote => "unterminated quote",
            ErrorKind::UnbalancedScopeClose => "unbalanced scope close",
            ErrorKind::UnknownDirective => "unknown directive",
            ErrorKind::DepthLimit => "depth limit exceeded",
            ErrorKind::Io => "i/o error",
            ErrorKind::Utf8 => "invalid utf-8",
            ErrorKind::Deserialize => "deserialize error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}{}", line_suffix(.location))]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
        }
    }

    pub fn unterminated_quote(delimiter: &str) -> Self {
        Self::new(
            ErrorKind::UnterminatedQuote,
            format!("quoted value never closed by {delimiter:?}"),
        )
    }

    pub fn unbalanced_scope_close() -> Self {
        Self::new(
            ErrorKind::UnbalancedScopeClose,
            "scope close marker without an open scope",
        )
    }

    pub fn unknown_directive(word: &str) -> Self {
        Self::new(
            ErrorKind::UnknownDirective,
            format!("unknown directive :{word}"),
        )
    }

    pub fn depth_limit(limit: usize) -> Self {
        Self::new(
            ErrorKind::DepthLimit,
            format!("nesting deeper than {limit} levels"),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn utf8(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Utf8, message)
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Deserialize, message)
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.location = Some(Location { line });
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

fn line_suffix(location: &Option<Location>) -> String {
    match location {
        Some(Location { line }) => format!(" at line {line}"),
        None => String::new(),
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(format!("read failed: {err}"))
    }
}
