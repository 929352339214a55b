//! Batch parsing. With the `parallel` feature, inputs are spread across the
//! rayon thread pool; each input still gets its own [`Parser`](crate::Parser).

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{parse_with_options, Document, ParseOptions};

#[cfg(feature = "parallel")]
pub fn parse_batch<S>(inputs: &[S], options: &ParseOptions) -> Vec<Document>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| parse_with_options(input.as_ref(), options))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn parse_batch<S>(inputs: &[S], options: &ParseOptions) -> Vec<Document>
where
    S: AsRef<str>,
{
    inputs
        .iter()
        .map(|input| parse_with_options(input.as_ref(), options))
        .collect()
}
