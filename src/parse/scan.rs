use memchr::memchr;

/// Splits input into lines, each keeping its `\n` terminator. The final line
/// is yielded without one when the input does not end in a newline.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    input: &'a str,
    pos: usize,
}

pub fn lines(input: &str) -> Lines<'_> {
    Lines { input, pos: 0 }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.input.get(self.pos..).filter(|rest| !rest.is_empty())?;
        let end = match memchr(b'\n', rest.as_bytes()) {
            Some(idx) => idx + 1,
            None => rest.len(),
        };
        self.pos += end;
        Some(&rest[..end])
    }
}
