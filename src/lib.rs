pub mod arena;
pub mod constants;
pub mod document;
pub mod error;
pub mod options;
pub mod parallel;
pub mod parse;
pub mod text;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use crate::arena::{Entry, Node, NodeId, NodeKind};
pub use crate::document::Document;
pub use crate::error::{Error, ErrorKind};
pub use crate::options::ParseOptions;
pub use crate::parallel::parse_batch;
pub use crate::parse::Parser;

pub type Result<T> = std::result::Result<T, Error>;

pub fn parse(input: &str) -> Document {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(input: &str, options: &ParseOptions) -> Document {
    parse::parse_str(input, options)
}

/// Parses lines pulled from `reader`. Only reading can fail.
pub fn parse_from<R: BufRead>(reader: R) -> Result<Document> {
    parse_from_with_options(reader, &ParseOptions::default())
}

pub fn parse_from_with_options<R: BufRead>(
    reader: R,
    options: &ParseOptions,
) -> Result<Document> {
    parse::parse_reader(reader, options)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, &ParseOptions::default())
}

pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<Document> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|err| Error::io(format!("open {} failed: {err}", path.display())))?;
    parse_from_with_options(BufReader::new(file), options)
}

pub fn parse_to_value(input: &str) -> Value {
    parse(input).into_value()
}

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    from_str_with_options(input, &ParseOptions::default())
}

pub fn from_str_with_options<T: DeserializeOwned>(
    input: &str,
    options: &ParseOptions,
) -> Result<T> {
    let value = parse_with_options(input, options).into_value();
    serde_json::from_value(value)
        .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
}
