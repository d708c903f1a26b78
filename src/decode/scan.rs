use memchr::memchr_iter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Line content without its `\n` / `\r\n` terminator.
    pub content: &'a str,
}

/// Splits `input` into lines. A trailing terminator does not open an
/// extra empty line, so `"a\n"` and `"a"` both scan to one line.
pub fn scan_lines(input: &str) -> Vec<ScanLine<'_>> {
    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    for idx in memchr_iter(b'\n', bytes) {
        lines.push(ScanLine {
            number: lines.len() + 1,
            content: strip_cr(&input[start..idx]),
        });
        start = idx + 1;
    }
    if start < bytes.len() {
        lines.push(ScanLine {
            number: lines.len() + 1,
            content: strip_cr(&input[start..]),
        });
    }
    lines
}

/// Drops the line terminator from one caller-supplied line.
pub fn strip_terminator(line: &str) -> &str {
    strip_cr(line.strip_suffix('\n').unwrap_or(line))
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
