use std::fmt;

use crate::protocol::{HeaderName, HeaderValue};

/// One header field: a name and its unfolded value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    name: HeaderName,
    value: HeaderValue,
}

impl Header {
    pub fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    pub fn value(&self) -> &HeaderValue {
        &self.value
    }

    pub(crate) fn set_value(&mut self, value: HeaderValue) {
        self.value = value;
    }

    pub fn into_parts(self) -> (HeaderName, HeaderValue) {
        (self.name, self.value)
    }

    /// Length of the rendered `Name: Value` line, terminator excluded.
    pub(crate) fn rendered_len(&self) -> usize {
        self.name.len() + 2 + self.value.len()
    }
}

impl From<(HeaderName, HeaderValue)> for Header {
    fn from((name, value): (HeaderName, HeaderValue)) -> Self {
        Self { name, value }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, String::from_utf8_lossy(self.value.as_bytes()))
    }
}
