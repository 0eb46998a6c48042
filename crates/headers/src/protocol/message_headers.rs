//! The header store: an ordered list of header fields with case-insensitive
//! lookup, mutation, parsing and serialization.

use std::iter::FusedIterator;
use std::slice;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Encoder;
use tracing::debug;

use crate::codec::{HeaderDecoder, HeaderEncoder};
use crate::protocol::{GenerateError, Header, HeaderName, HeaderValue, LineLimit, ParseError};

/// Ordered collection of header fields.
///
/// Insertion order is the rendering order, and several fields may share a
/// name (for example repeated SIP `Via` lines). Names are matched ignoring
/// ASCII case but written back with the casing they were stored with.
///
/// # Parsing appends
///
/// [`parse`](Self::parse) adds the decoded fields after the ones already
/// stored; it never clears the store. Callers needing isolation must start
/// from a fresh store. A failed parse keeps whatever fields were decoded
/// before the bad line, so a store should be discarded after a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHeaders {
    headers: Vec<Header>,
    limit: LineLimit,
}

impl MessageHeaders {
    /// Creates an empty store without a line limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that enforces `limit` on parse and folds to it
    /// on generate.
    pub fn with_line_limit<L: Into<LineLimit>>(limit: L) -> Self {
        Self { headers: Vec::new(), limit: limit.into() }
    }

    pub fn line_limit(&self) -> LineLimit {
        self.limit
    }

    pub fn set_line_limit<L: Into<LineLimit>>(&mut self, limit: L) {
        self.limit = limit.into();
    }

    /// Decodes the header block at the start of `raw` and appends its fields.
    ///
    /// # Returns
    ///
    /// The offset in `raw` where the body starts.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the header block is malformed or a line
    /// exceeds the line limit. See [`HeaderDecoder::decode`].
    pub fn parse(&mut self, raw: &[u8]) -> Result<usize, ParseError> {
        HeaderDecoder::new(self.limit)
            .decode(raw, &mut self.headers)
            .inspect_err(|e| debug!(cause = %e, "failed to parse header block"))
    }

    /// Like [`parse`](Self::parse), but hands back the body as a view into
    /// `raw` instead of an offset.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse).
    pub fn parse_message(&mut self, raw: Bytes) -> Result<Bytes, ParseError> {
        let body_offset = self.parse(&raw)?;
        Ok(raw.slice(body_offset..))
    }

    /// Serializes all fields, followed by the empty line ending the block.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::FoldFailure` if a line limit is set and some
    /// field has no whitespace to fold at.
    pub fn generate(&self) -> Result<Bytes, GenerateError> {
        let mut dst = BytesMut::new();
        self.encode_into(&mut dst)?;
        Ok(dst.freeze())
    }

    /// Serializes all fields into `dst`, after whatever it already holds.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate); `dst` is left as it was.
    pub fn encode_into(&self, dst: &mut BytesMut) -> Result<(), GenerateError> {
        HeaderEncoder::new(self.limit)
            .encode(self.headers.as_slice(), dst)
            .inspect_err(|e| debug!(cause = %e, "failed to generate header block"))
    }

    /// All fields in storage order.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn iter(&self) -> slice::Iter<'_, Header> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Removes every field, keeping the line limit.
    pub fn clear(&mut self) {
        self.headers.clear();
    }

    pub fn contains<N: AsRef<[u8]>>(&self, name: N) -> bool {
        self.position(name.as_ref()).is_some()
    }

    /// Returns the value of the field named `name`.
    ///
    /// When several fields share the name, their values are joined with a
    /// comma (no whitespace added) in storage order. `None` means the field is
    /// absent; a present field with an empty value gives an empty value.
    pub fn get<N: AsRef<[u8]>>(&self, name: N) -> Option<HeaderValue> {
        let mut values = self.get_all(name.as_ref()).peekable();
        values.peek()?;
        Some(HeaderValue::join(values, b','))
    }

    /// Returns the values of every field named `name`, in storage order.
    pub fn get_all<'a, N: AsRef<[u8]> + ?Sized>(&'a self, name: &'a N) -> GetAll<'a> {
        GetAll { headers: self.headers.iter(), name: name.as_ref() }
    }

    /// Replaces the value of the first field named `name` and removes the
    /// others with that name, or appends a new field if there is none.
    ///
    /// The stored field keeps its position and its original name casing.
    pub fn set_one(&mut self, name: HeaderName, value: HeaderValue) {
        let Some(index) = self.position(name.as_bytes()) else {
            self.headers.push(Header::new(name, value));
            return;
        };

        self.headers[index].set_value(value);

        let mut current = 0;
        self.headers.retain(|header| {
            let keep = current <= index || !header.name().eq_ignore_case(name.as_bytes());
            current += 1;
            keep
        });
    }

    /// Sets a field from several values.
    ///
    /// With `one_line` the values are joined with commas into a single field;
    /// otherwise the first value is set and each other value is added as its
    /// own field. An empty `values` leaves the store untouched.
    pub fn set_many<I>(&mut self, name: HeaderName, values: I, one_line: bool)
    where
        I: IntoIterator<Item = HeaderValue>,
    {
        let values: Vec<HeaderValue> = values.into_iter().collect();
        let Some((first, rest)) = values.split_first() else {
            return;
        };

        if one_line {
            self.set_one(name, HeaderValue::join(&values, b','));
        } else {
            self.set_one(name.clone(), first.clone());
            for value in rest {
                self.add_one(name.clone(), value.clone());
            }
        }
    }

    /// Appends a field, whatever fields with the same name exist already.
    pub fn add_one(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.push(Header::new(name, value));
    }

    /// Appends fields from several values, never replacing existing ones.
    ///
    /// With `one_line` a single comma-joined field is appended; otherwise one
    /// field per value. An empty `values` leaves the store untouched.
    pub fn add_many<I>(&mut self, name: HeaderName, values: I, one_line: bool)
    where
        I: IntoIterator<Item = HeaderValue>,
    {
        if one_line {
            let values: Vec<HeaderValue> = values.into_iter().collect();
            if !values.is_empty() {
                self.add_one(name, HeaderValue::join(&values, b','));
            }
        } else {
            self.headers.extend(values.into_iter().map(|value| Header::new(name.clone(), value)));
        }
    }

    /// Removes every field named `name` and returns how many were removed.
    pub fn remove<N: AsRef<[u8]>>(&mut self, name: N) -> usize {
        let name = name.as_ref();
        let before = self.headers.len();
        self.headers.retain(|header| !header.name().eq_ignore_case(name));
        before - self.headers.len()
    }

    fn position(&self, name: &[u8]) -> Option<usize> {
        self.headers.iter().position(|header| header.name().eq_ignore_case(name))
    }
}

/// Iterator over the values of every field with a given name.
///
/// Created by [`MessageHeaders::get_all`].
#[derive(Debug, Clone)]
pub struct GetAll<'a> {
    headers: slice::Iter<'a, Header>,
    name: &'a [u8],
}

impl<'a> Iterator for GetAll<'a> {
    type Item = &'a HeaderValue;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.name;
        self.headers.find(|header| header.name().eq_ignore_case(name)).map(Header::value)
    }
}

impl DoubleEndedIterator for GetAll<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let name = self.name;
        self.headers.rfind(|header| header.name().eq_ignore_case(name)).map(Header::value)
    }
}

impl FusedIterator for GetAll<'_> {}

impl Extend<Header> for MessageHeaders {
    fn extend<T: IntoIterator<Item = Header>>(&mut self, iter: T) {
        self.headers.extend(iter);
    }
}

impl FromIterator<Header> for MessageHeaders {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        Self { headers: iter.into_iter().collect(), limit: LineLimit::UNLIMITED }
    }
}

impl<'a> IntoIterator for &'a MessageHeaders {
    type Item = &'a Header;
    type IntoIter = slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

impl IntoIterator for MessageHeaders {
    type Item = Header;
    type IntoIter = std::vec::IntoIter<Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}
