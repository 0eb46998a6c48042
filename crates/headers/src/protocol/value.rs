//! Header field values.

use std::fmt;
use std::str::{FromStr, Utf8Error};

use bytes::{BufMut, Bytes, BytesMut};

use crate::protocol::InvalidHeader;

/// A header field value: arbitrary bytes without CR or LF.
///
/// Values coming out of the decoder are already unfolded and trimmed. Values
/// built by hand are stored as given, minus the line break check.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeaderValue {
    inner: Bytes,
}

impl HeaderValue {
    /// Creates a value from a static string.
    ///
    /// # Panics
    ///
    /// Panics if the input contains CR or LF.
    pub const fn from_static(value: &'static str) -> Self {
        let bytes = value.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if is_line_break(bytes[i]) {
                panic!("header value contains a line break");
            }
            i += 1;
        }
        Self { inner: Bytes::from_static(bytes) }
    }

    /// Creates a value by copying the given bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the value contains CR or LF.
    pub fn from_bytes(value: &[u8]) -> Result<Self, InvalidHeader> {
        Self::from_shared(Bytes::copy_from_slice(value))
    }

    /// Creates a value from shared bytes without copying.
    ///
    /// # Errors
    ///
    /// Returns error if the value contains CR or LF.
    pub fn from_shared(value: Bytes) -> Result<Self, InvalidHeader> {
        match value.iter().position(|b| is_line_break(*b)) {
            Some(index) => Err(InvalidHeader::value(format!("line break at index {index}"))),
            None => Ok(Self { inner: value }),
        }
    }

    pub(crate) fn from_validated(value: Bytes) -> Self {
        Self { inner: value }
    }

    /// Joins values with `separator`, without adding whitespace.
    pub fn join<'a, I>(values: I, separator: u8) -> Self
    where
        I: IntoIterator<Item = &'a HeaderValue>,
    {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let Some(second) = iter.next() else {
            return first.clone();
        };

        let mut buf = BytesMut::with_capacity(first.len() + second.len() + 1);
        buf.put_slice(first.as_bytes());
        for value in std::iter::once(second).chain(iter) {
            buf.put_u8(separator);
            buf.put_slice(value.as_bytes());
        }
        Self { inner: buf.freeze() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Views the value as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns error if the value is not valid UTF-8.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.inner)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

const fn is_line_break(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

impl AsRef<[u8]> for HeaderValue {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl PartialEq<str> for HeaderValue {
    fn eq(&self, other: &str) -> bool {
        self.inner == other.as_bytes()
    }
}

impl PartialEq<&str> for HeaderValue {
    fn eq(&self, other: &&str) -> bool {
        self.inner == other.as_bytes()
    }
}

impl PartialEq<[u8]> for HeaderValue {
    fn eq(&self, other: &[u8]) -> bool {
        self.inner == other
    }
}

impl fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            Ok(s) => fmt::Debug::fmt(s, f),
            Err(_) => fmt::Debug::fmt(&self.inner, f),
        }
    }
}

impl FromStr for HeaderValue {
    type Err = InvalidHeader;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

impl TryFrom<&str> for HeaderValue {
    type Error = InvalidHeader;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_bytes(value.as_bytes())
    }
}

impl TryFrom<String> for HeaderValue {
    type Error = InvalidHeader;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_shared(Bytes::from(value))
    }
}

macro_rules! from_integers {
    ($($t:ty),*) => {
        $(
            impl From<$t> for HeaderValue {
                fn from(num: $t) -> Self {
                    Self { inner: Bytes::from(num.to_string()) }
                }
            }
        )*
    };
}

from_integers!(u16, u32, u64, usize, i32, i64);
