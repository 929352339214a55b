pub mod format;

use crate::constants::is_space;

pub use format::{format_value, CommitMode};

pub fn trim_start(value: &str) -> &str {
    value.trim_start_matches(is_space)
}

pub fn trim_end(value: &str) -> &str {
    value.trim_end_matches(is_space)
}

pub fn trim(value: &str) -> &str {
    value.trim_matches(is_space)
}

/// The whitespace run that ends `value`.
pub fn trailing_whitespace(value: &str) -> &str {
    &value[trim_end(value).len()..]
}

pub fn is_blank(value: &str) -> bool {
    value.chars().all(is_space)
}
