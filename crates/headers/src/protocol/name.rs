//! Header field names.
//!
//! Names compare case-insensitively but keep the casing they were created
//! with, so `Content-Type` parsed from the wire is written back as
//! `Content-Type` even after it was looked up as `content-type`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use bytes::Bytes;

use crate::protocol::InvalidHeader;

/// A header field name.
///
/// Equality and hashing use the ASCII lower-cased view of the name, while the
/// original bytes are kept for output.
#[derive(Clone)]
pub struct HeaderName {
    inner: Bytes,
}

impl HeaderName {
    /// Creates a name from a static string.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header name.
    pub const fn from_static(name: &'static str) -> Self {
        if !is_valid_name(name.as_bytes()) {
            panic!("invalid header name");
        }
        Self { inner: Bytes::from_static(name.as_bytes()) }
    }

    /// Creates a name by copying the given bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty, or if any byte is outside the
    /// visible ASCII range or is a colon.
    pub fn from_bytes(name: &[u8]) -> Result<Self, InvalidHeader> {
        Self::from_shared(Bytes::copy_from_slice(name))
    }

    /// Creates a name from shared bytes without copying.
    ///
    /// # Errors
    ///
    /// Same as [`HeaderName::from_bytes`].
    pub fn from_shared(name: Bytes) -> Result<Self, InvalidHeader> {
        if name.is_empty() {
            return Err(InvalidHeader::name("empty name"));
        }
        match name.iter().position(|b| !is_name_byte(*b)) {
            Some(index) => Err(InvalidHeader::name(format!("byte 0x{:02x} at index {index}", name[index]))),
            None => Ok(Self { inner: name }),
        }
    }

    /// Parser-side constructor: the decoder has already checked every byte.
    pub(crate) fn from_validated(name: Bytes) -> Self {
        debug_assert!(is_valid_name(&name));
        Self { inner: name }
    }

    /// Returns the name with its original casing.
    pub fn as_str(&self) -> &str {
        // SAFETY: every constructor checks that the bytes are visible ASCII,
        // which is always valid UTF-8.
        unsafe { std::str::from_utf8_unchecked(&self.inner) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Always false; an empty name can not be constructed.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Checks whether `other` names the same header, ignoring ASCII case.
    pub fn eq_ignore_case(&self, other: &[u8]) -> bool {
        self.inner.eq_ignore_ascii_case(other)
    }
}

/// Bytes allowed in a name: visible ASCII (33..=126) minus the separator.
pub(crate) const fn is_name_byte(b: u8) -> bool {
    is_visible(b) && b != b':'
}

pub(crate) const fn is_visible(b: u8) -> bool {
    matches!(b, 33..=126)
}

const fn is_valid_name(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if !is_name_byte(bytes[i]) {
            return false;
        }
        i += 1;
    }
    true
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &Self) -> bool {
        self.eq_ignore_case(&other.inner)
    }
}

impl Eq for HeaderName {}

impl PartialEq<str> for HeaderName {
    fn eq(&self, other: &str) -> bool {
        self.eq_ignore_case(other.as_bytes())
    }
}

impl PartialEq<&str> for HeaderName {
    fn eq(&self, other: &&str) -> bool {
        self.eq_ignore_case(other.as_bytes())
    }
}

impl PartialEq<HeaderName> for &str {
    fn eq(&self, other: &HeaderName) -> bool {
        other.eq_ignore_case(self.as_bytes())
    }
}

impl Hash for HeaderName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.inner.len());
        for b in &self.inner {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl AsRef<[u8]> for HeaderName {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl fmt::Debug for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderName {
    type Err = InvalidHeader;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

impl TryFrom<&str> for HeaderName {
    type Error = InvalidHeader;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_bytes(value.as_bytes())
    }
}

impl TryFrom<String> for HeaderName {
    type Error = InvalidHeader;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_shared(Bytes::from(value))
    }
}
