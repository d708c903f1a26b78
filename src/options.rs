#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Keep `#` lines as ordinary text instead of discarding them.
    pub comments: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_default_discards_comments() {
        assert!(!DecodeOptions::default().comments);
        assert!(DecodeOptions::new().with_comments(true).comments);
    }
}
