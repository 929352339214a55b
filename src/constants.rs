/// Field naming the kind of a freeform element.
pub const TYPE_KEY: &str = "type";

/// Field holding the payload of a freeform element.
pub const VALUE_KEY: &str = "value";

/// `type` given to bare content lines inside a freeform list.
pub const TEXT_TYPE: &str = "text";

pub const PATH_SEPARATOR: char = '.';

/// Deepest node a document may hold, counting the root as 0. Structural lines
/// that would nest further are read as text, which keeps serialized output
/// within the 128-level recursion limit of common JSON readers.
pub const MAX_DEPTH: usize = 100;

/// Whitespace as the markup understands it: ASCII blanks, line breaks, form
/// feed and vertical tab.
#[inline]
pub fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Padding allowed between the parts of a structural line.
#[inline]
pub fn is_padding(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r')
}

/// Characters allowed in keys and scope names.
#[inline]
pub fn is_key_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '[' | ']' | '{' | '}' | ':' | '\\')
}
