use std::io;

use thiserror::Error;

/// Top-level error covering every failure this crate reports.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("parse error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("generate error: {source}")]
    Generate {
        #[from]
        source: GenerateError,
    },

    #[error("invalid header: {source}")]
    Invalid {
        #[from]
        source: InvalidHeader,
    },
}

/// Errors raised while decoding a raw header block.
///
/// Every variant carries the byte offset of the line that failed, counted from
/// the start of the buffer handed to the decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("header line too long at offset {offset}, current: {line_len} exceed the limit {limit}")]
    LineTooLong { line_len: usize, limit: usize, offset: usize },

    #[error("malformed header name at offset {offset}")]
    MalformedName { offset: usize },

    #[error("header value with a lone CR or LF at offset {offset}")]
    MalformedValue { offset: usize },

    #[error("missing colon in header line at offset {offset}")]
    MissingColon { offset: usize },

    #[error("truncated header block at offset {offset}")]
    TruncatedInput { offset: usize },
}

impl ParseError {
    pub fn line_too_long(line_len: usize, limit: usize, offset: usize) -> Self {
        Self::LineTooLong { line_len, limit, offset }
    }

    pub fn malformed_name(offset: usize) -> Self {
        Self::MalformedName { offset }
    }

    pub fn malformed_value(offset: usize) -> Self {
        Self::MalformedValue { offset }
    }

    pub fn missing_colon(offset: usize) -> Self {
        Self::MissingColon { offset }
    }

    pub fn truncated_input(offset: usize) -> Self {
        Self::TruncatedInput { offset }
    }

    /// Byte offset of the line that caused the failure.
    pub fn offset(&self) -> usize {
        match self {
            Self::LineTooLong { offset, .. }
            | Self::MalformedName { offset }
            | Self::MalformedValue { offset }
            | Self::MissingColon { offset }
            | Self::TruncatedInput { offset } => *offset,
        }
    }
}

/// Errors raised while serializing headers.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("cannot fold header {name} within the line limit {limit}")]
    FoldFailure { name: String, limit: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl GenerateError {
    pub fn fold_failure<S: ToString>(name: S, limit: usize) -> Self {
        Self::FoldFailure { name: name.to_string(), limit }
    }
}

/// Errors raised when building a [`HeaderName`](super::HeaderName) or
/// [`HeaderValue`](super::HeaderValue) from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidHeader {
    #[error("invalid header name: {reason}")]
    Name { reason: String },

    #[error("invalid header value: {reason}")]
    Value { reason: String },
}

impl InvalidHeader {
    pub fn name<S: ToString>(str: S) -> Self {
        Self::Name { reason: str.to_string() }
    }

    pub fn value<S: ToString>(str: S) -> Self {
        Self::Value { reason: str.to_string() }
    }
}
