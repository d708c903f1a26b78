pub mod arena;
pub mod constants;
pub mod decode;
pub mod error;
pub mod options;
pub mod text;

use std::io::{BufRead, BufReader, Read};

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use crate::error::{Error, ErrorKind, Location};
pub use crate::options::DecodeOptions;

pub type Result<T> = std::result::Result<T, Error>;

/// Parses a sequence of lines. Lines may or may not carry their `\n` or
/// `\r\n` terminators.
pub fn load<I, S>(lines: I) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    load_with_options(lines, &DecodeOptions::default())
}

pub fn load_with_options<I, S>(lines: I, options: &DecodeOptions) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    decode::load(lines, options)
}

pub fn loads(input: &str) -> Result<Value> {
    loads_with_options(input, &DecodeOptions::default())
}

pub fn loads_with_options(input: &str, options: &DecodeOptions) -> Result<Value> {
    decode::loads(input, options)
}

pub fn load_reader<R: BufRead>(reader: R) -> Result<Value> {
    load_reader_with_options(reader, &DecodeOptions::default())
}

pub fn load_reader_with_options<R: BufRead>(reader: R, options: &DecodeOptions) -> Result<Value> {
    decode::load_reader(reader, options)
}

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    from_str_with_options(input, &DecodeOptions::default())
}

pub fn from_str_with_options<T: DeserializeOwned>(
    input: &str,
    options: &DecodeOptions,
) -> Result<T> {
    decode::from_str(input, options)
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    from_slice_with_options(input, &DecodeOptions::default())
}

pub fn from_slice_with_options<T: DeserializeOwned>(
    input: &[u8],
    options: &DecodeOptions,
) -> Result<T> {
    decode::from_slice(input, options)
}

pub fn from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    from_reader_with_options(reader, &DecodeOptions::default())
}

pub fn from_reader_with_options<T: DeserializeOwned, R: Read>(
    reader: R,
    options: &DecodeOptions,
) -> Result<T> {
    decode::from_reader(BufReader::new(reader), options)
}

pub fn validate_str(input: &str) -> Result<()> {
    validate_str_with_options(input, &DecodeOptions::default())
}

pub fn validate_str_with_options(input: &str, options: &DecodeOptions) -> Result<()> {
    decode::validate_str(input, options)
}

/// Parses independent documents. Results keep the order of `inputs`.
pub fn loads_many(inputs: &[&str]) -> Vec<Result<Value>> {
    loads_many_with_options(inputs, &DecodeOptions::default())
}

#[cfg(feature = "parallel")]
pub fn loads_many_with_options(inputs: &[&str], options: &DecodeOptions) -> Vec<Result<Value>> {
    use rayon::prelude::*;

    inputs
        .par_iter()
        .map(|input| decode::loads(input, options))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn loads_many_with_options(inputs: &[&str], options: &DecodeOptions) -> Vec<Result<Value>> {
    inputs
        .iter()
        .map(|input| decode::loads(input, options))
        .collect()
}
