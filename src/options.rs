#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Strip legacy `[inline comments]` and collapse `[[literal]]` brackets.
    pub comments: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }
}
