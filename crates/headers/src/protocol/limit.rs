use std::fmt;
use std::num::NonZeroUsize;

/// Maximum number of bytes in one physical header line, CRLF included.
///
/// The same limit is enforced when decoding and used as the folding budget
/// when encoding. Zero means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LineLimit(Option<NonZeroUsize>);

impl LineLimit {
    pub const UNLIMITED: Self = Self(None);

    /// 998 characters plus CRLF, the hard limit of RFC 2822 section 2.1.1.
    pub const RFC_2822: Self = Self::new(1000);

    pub const fn new(limit: usize) -> Self {
        Self(NonZeroUsize::new(limit))
    }

    pub const fn get(self) -> Option<NonZeroUsize> {
        self.0
    }

    pub const fn is_unlimited(self) -> bool {
        self.0.is_none()
    }

    /// Checks whether a line of `line_len` bytes, terminator included, fits.
    pub fn allows(self, line_len: usize) -> bool {
        self.0.is_none_or(|limit| line_len <= limit.get())
    }
}

impl From<usize> for LineLimit {
    fn from(limit: usize) -> Self {
        Self::new(limit)
    }
}

impl From<Option<NonZeroUsize>> for LineLimit {
    fn from(limit: Option<NonZeroUsize>) -> Self {
        Self(limit)
    }
}

impl fmt::Display for LineLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(limit) => write!(f, "{limit}"),
            None => f.write_str("unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_unlimited() {
        assert!(LineLimit::new(0).is_unlimited());
        assert_eq!(LineLimit::default(), LineLimit::UNLIMITED);
        assert!(LineLimit::UNLIMITED.allows(usize::MAX));
    }

    #[test]
    fn limit_is_inclusive() {
        let limit = LineLimit::from(12);
        assert!(limit.allows(12));
        assert!(!limit.allows(13));
        assert_eq!(limit.get().map(NonZeroUsize::get), Some(12));
        assert_eq!(LineLimit::RFC_2822.to_string(), "1000");
    }
}
