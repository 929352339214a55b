use std::borrow::Cow;

/// How a buffered value lands in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// First line of a value; overwrites whatever the target held.
    Replace,
    /// Continuation lines closed by `:end`; concatenated onto the target.
    Append,
}

/// Normalizes buffered text before it is committed.
///
/// With `comments` enabled, bracketed inline comments are removed and doubled
/// brackets collapse to literal ones. Appended text additionally loses one
/// escaping backslash at the start of each line.
pub fn format_value(value: &str, mode: CommitMode, comments: bool) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(value);
    if comments {
        out = apply(out, strip_comments);
        out = apply(out, collapse_literal_brackets);
    }
    if mode == CommitMode::Append {
        out = apply(out, unescape_lines);
    }
    out
}

fn apply<'a>(value: Cow<'a, str>, pass: fn(&str) -> Cow<'_, str>) -> Cow<'a, str> {
    match value {
        Cow::Borrowed(text) => pass(text),
        Cow::Owned(text) => {
            let changed = match pass(&text) {
                Cow::Owned(changed) => Some(changed),
                Cow::Borrowed(_) => None,
            };
            Cow::Owned(changed.unwrap_or(text))
        }
    }
}

/// Finds the end of a single-bracket span opened at `open`: the index of the
/// closing `]` when no bracket or line break comes first.
fn closing_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let offset = memchr::memchr3(b'[', b']', b'\n', &bytes[open + 1..])
        .map(|found| found + open + 1);
    let close = match offset {
        Some(idx) if bytes[idx] == b']' => idx,
        _ => return None,
    };
    if bytes[open + 1..close].contains(&b'\r') {
        return None;
    }
    Some(close)
}

fn at_line_start(bytes: &[u8], idx: usize) -> bool {
    idx == 0 || bytes[idx - 1] == b'\n'
}

/// Removes `[comment]` spans. A span directly followed by `]` is the outer
/// layer of a doubled bracket and stays; a backslash opening the line goes
/// together with the span it precedes.
pub fn strip_comments(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    if memchr::memchr(b'[', bytes).is_none() {
        return Cow::Borrowed(value);
    }
    let is_comment = |open: usize| -> Option<usize> {
        let close = closing_bracket(bytes, open)?;
        match bytes.get(close + 1) {
            Some(b']') => None,
            _ => Some(close),
        }
    };

    let mut out = String::with_capacity(value.len());
    let mut copied = 0;
    let mut idx = 0;
    while idx < bytes.len() {
        let span = match bytes[idx] {
            b'\\' if at_line_start(bytes, idx) && bytes.get(idx + 1) == Some(&b'[') => {
                is_comment(idx + 1)
            }
            b'[' => is_comment(idx),
            _ => None,
        };
        match span {
            Some(close) => {
                out.push_str(&value[copied..idx]);
                idx = close + 1;
                copied = idx;
            }
            None => idx += 1,
        }
    }
    if copied == 0 {
        return Cow::Borrowed(value);
    }
    out.push_str(&value[copied..]);
    Cow::Owned(out)
}

/// Collapses `[[text]]` to `[text]`.
pub fn collapse_literal_brackets(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    if memchr::memmem::find(bytes, b"[[").is_none() {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut copied = 0;
    let mut idx = 0;
    while idx + 1 < bytes.len() {
        if bytes[idx] == b'[' && bytes[idx + 1] == b'[' {
            if let Some(close) = closing_bracket(bytes, idx + 1) {
                if bytes.get(close + 1) == Some(&b']') {
                    out.push_str(&value[copied..idx]);
                    out.push_str(&value[idx + 1..=close]);
                    idx = close + 2;
                    copied = idx;
                    continue;
                }
            }
        }
        idx += 1;
    }
    if copied == 0 {
        return Cow::Borrowed(value);
    }
    out.push_str(&value[copied..]);
    Cow::Owned(out)
}

/// Drops the first backslash following the leading whitespace of each line.
pub fn unescape_lines(value: &str) -> Cow<'_, str> {
    if memchr::memchr(b'\\', value.as_bytes()).is_none() {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut changed = false;
    for line in value.split_inclusive('\n') {
        let content =
            line.trim_start_matches(|ch: char| ch != '\n' && crate::constants::is_space(ch));
        let indent = &line[..line.len() - content.len()];
        match content.strip_prefix('\\') {
            Some(unescaped) => {
                out.push_str(indent);
                out.push_str(unescaped);
                changed = true;
            }
            None => out.push_str(line),
        }
    }
    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("value [note] value", "value  value")]
    #[case("[note]value", "value")]
    #[case("a [x] b [y] c", "a  b  c")]
    #[case("[[literal]]", "[[literal]]")]
    #[case("unclosed [bracket", "unclosed [bracket")]
    #[case("split [across\nlines]", "split [across\nlines]")]
    #[case("\\[escaped comment]rest", "rest")]
    #[case("mid \\[note] line", "mid \\ line")]
    #[case("nested [outer [inner] outer]", "nested [outer  outer]")]
    fn strips_comments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_comments(input), expected);
    }

    #[rstest::rstest]
    #[case("[[literal]]", "[literal]")]
    #[case("a [[b]] c [[d]]", "a [b] c [d]")]
    #[case("[[open", "[[open")]
    #[case("[[a]", "[[a]")]
    fn collapses_literal_brackets(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(collapse_literal_brackets(input), expected);
    }

    #[rstest::rstest]
    #[case("\n\\:end\n", "\n:end\n")]
    #[case("\n  \\* item\n", "\n  * item\n")]
    #[case("\n\\\\double\n", "\n\\double\n")]
    #[case("\nmid \\ line\n", "\nmid \\ line\n")]
    #[case("\\first\n\\second", "first\nsecond")]
    fn unescapes_leading_backslash(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(unescape_lines(input), expected);
    }

    #[rstest::rstest]
    fn comments_are_left_alone_by_default() {
        let formatted = format_value("a [b] c", CommitMode::Replace, false);
        assert_eq!(formatted, "a [b] c");
    }

    #[rstest::rstest]
    fn replace_mode_keeps_backslashes() {
        let formatted = format_value("\\:end", CommitMode::Replace, false);
        assert_eq!(formatted, "\\:end");
    }

    #[rstest::rstest]
    fn literal_brackets_survive_comment_pass() {
        let formatted = format_value("keep [[this]] drop [that]", CommitMode::Replace, true);
        assert_eq!(formatted, "keep [this] drop ");
    }

    #[rstest::rstest]
    #[case("plain text\nover lines")]
    #[case("  indented\n\ttabbed")]
    #[case("")]
    fn formatting_is_idempotent_on_normalized_text(#[case] input: &str) {
        for mode in [CommitMode::Replace, CommitMode::Append] {
            let once = format_value(input, mode, true).into_owned();
            let twice = format_value(&once, mode, true).into_owned();
            assert_eq!(once, twice);
        }
    }
}
