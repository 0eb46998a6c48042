//! Header block encoder: serializes header fields, folding long lines.
//!
//! Every field is rendered as `Name: Value` followed by CRLF, in list order,
//! and the block always ends with an empty line. With a line limit set, a
//! rendered line that does not fit is folded at whitespace into a first line
//! and continuation lines that each start with a single space.
//!
//! # Folding
//!
//! The break point is the last space or tab that still leaves room for the
//! terminator (two bytes) on the first line, or for the terminator plus the
//! leading space (three bytes) on continuation lines. Within that window the
//! last whitespace ending a whitespace run is preferred, so the continuation
//! starts with a non-blank byte and unfolding restores the value exactly;
//! otherwise the last whitespace is used. The whitespace between `Name:` and
//! the value is never used as a break point, and a continuation is never
//! split at its first byte, which would emit a blank continuation line. If no
//! break point exists the whole encode fails with
//! [`GenerateError::FoldFailure`].

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::{debug, trace};

use crate::codec::header::header_decoder::is_wsp;
use crate::protocol::{GenerateError, Header, LineLimit};

const CRLF: &[u8] = b"\r\n";

/// Bytes reserved for the terminator on the first physical line.
const FIRST_LINE_RESERVED: usize = CRLF.len();

/// Bytes reserved for the terminator and the leading space on continuations.
const CONTINUATION_RESERVED: usize = CRLF.len() + 1;

/// Encoder for header lists implementing the [`Encoder`] trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder {
    limit: LineLimit,
}

impl HeaderEncoder {
    pub fn new(limit: LineLimit) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> LineLimit {
        self.limit
    }

    fn encode_header(&self, header: &Header, dst: &mut BytesMut) -> Result<(), GenerateError> {
        let line_len = header.rendered_len() + CRLF.len();
        let limit = match self.limit.get() {
            Some(limit) if line_len > limit.get() => limit.get(),
            _ => {
                dst.put_slice(header.name().as_bytes());
                dst.put_slice(b": ");
                dst.put_slice(header.value().as_bytes());
                dst.put_slice(CRLF);
                return Ok(());
            }
        };

        let mut line = Vec::with_capacity(header.rendered_len());
        line.extend_from_slice(header.name().as_bytes());
        line.extend_from_slice(b": ");
        line.extend_from_slice(header.value().as_bytes());

        if fold_line(&line, limit, dst) {
            Ok(())
        } else {
            debug!(header = %header.name(), limit, line_len, "no fold point within the line limit");
            Err(GenerateError::fold_failure(header.name(), limit))
        }
    }
}

impl<'a> Encoder<&'a [Header]> for HeaderEncoder {
    type Error = GenerateError;

    /// Encodes the header block, empty line included, into `dst`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::FoldFailure` if a field can not be folded to
    /// fit the line limit. Nothing written by this call is left in `dst`.
    fn encode(&mut self, headers: &'a [Header], dst: &mut BytesMut) -> Result<(), Self::Error> {
        let start = dst.len();
        dst.reserve(headers.iter().map(|h| h.rendered_len() + CRLF.len()).sum::<usize>() + CRLF.len());

        for header in headers {
            if let Err(e) = self.encode_header(header, dst) {
                dst.truncate(start);
                return Err(e);
            }
        }
        dst.put_slice(CRLF);

        trace!(header_count = headers.len(), encoded_bytes = dst.len() - start, "encoded header block");
        Ok(())
    }
}

/// Writes `line` (terminator excluded) as one or more physical lines of at
/// most `limit` bytes each. Returns false when no fold point exists; `dst`
/// may then hold part of the line.
fn fold_line(line: &[u8], limit: usize, dst: &mut BytesMut) -> bool {
    // the separator after the colon is the first whitespace of the line
    let first_break = line.iter().position(|b| is_wsp(*b)).map_or(0, |index| index + 1);

    let mut rest = line;
    let mut first_part = true;
    while !rest.is_empty() {
        let (reserved, min_break) = if first_part { (FIRST_LINE_RESERVED, first_break) } else { (CONTINUATION_RESERVED, 1) };

        if !first_part {
            dst.put_u8(b' ');
        }

        if rest.len() + reserved <= limit {
            dst.put_slice(rest);
            dst.put_slice(CRLF);
            break;
        }

        let Some(last_index) = limit.checked_sub(reserved) else {
            return false;
        };
        let Some(at) = find_break(rest, last_index, min_break) else {
            return false;
        };

        dst.put_slice(&rest[..at]);
        dst.put_slice(CRLF);
        rest = &rest[at + 1..];
        first_part = false;
    }
    true
}

/// Picks the fold point in `rest[min_break..=last_index]`.
fn find_break(rest: &[u8], last_index: usize, min_break: usize) -> Option<usize> {
    let candidates = || (min_break..=last_index).rev().filter(|at| is_wsp(rest[*at]));
    candidates()
        .find(|at| !rest.get(at + 1).is_some_and(|b| is_wsp(*b)))
        .or_else(|| candidates().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{HeaderName, HeaderValue};

    fn header(name: &'static str, value: &'static str) -> Header {
        Header::new(HeaderName::from_static(name), HeaderValue::from_static(value))
    }

    fn encode(headers: &[Header], limit: usize) -> Result<BytesMut, GenerateError> {
        let mut dst = BytesMut::new();
        HeaderEncoder::new(LineLimit::new(limit)).encode(headers, &mut dst)?;
        Ok(dst)
    }

    #[test]
    fn encode_in_order() {
        let headers = [header("Host", "www.example.com"), header("Via", "a"), header("via", "b")];
        let dst = encode(&headers, 0).unwrap();
        assert_eq!(&dst[..], b"Host: www.example.com\r\nVia: a\r\nvia: b\r\n\r\n");
    }

    #[test]
    fn encode_empty_list() {
        assert_eq!(&encode(&[], 0).unwrap()[..], b"\r\n");
        assert_eq!(&encode(&[], 12).unwrap()[..], b"\r\n");
    }

    #[test]
    fn line_that_fits_is_unchanged() {
        // "X: Hello!\r\n" is 11 bytes
        let dst = encode(&[header("X", "Hello!")], 11).unwrap();
        assert_eq!(&dst[..], b"X: Hello!\r\n\r\n");
    }

    #[test]
    fn fold_at_last_whitespace() {
        let dst = encode(&[header("X", "Hello, World!")], 12).unwrap();
        assert_eq!(&dst[..], b"X: Hello,\r\n World!\r\n\r\n");
    }

    #[test]
    fn fold_into_several_lines() {
        let dst = encode(&[header("Subject", "one two three four five six")], 16).unwrap();
        assert_eq!(&dst[..], b"Subject: one\r\n two three\r\n four five six\r\n\r\n");
        for line in dst[..].split(|b| *b == b'\n') {
            assert!(line.len() + 1 <= 16);
        }
    }

    #[test]
    fn fold_on_tab() {
        let dst = encode(&[header("X", "Hello,\tWorld!")], 12).unwrap();
        assert_eq!(&dst[..], b"X: Hello,\r\n World!\r\n\r\n");
    }

    #[test]
    fn fold_at_end_of_whitespace_run() {
        let dst = encode(&[header("X", "Hello,  World!")], 12).unwrap();
        assert_eq!(&dst[..], b"X: Hello, \r\n World!\r\n\r\n");

        // the window ends inside a run: the earlier run end wins
        let dst = encode(&[header("X", "a b Hello,  World!")], 15).unwrap();
        assert_eq!(&dst[..], b"X: a b\r\n Hello, \r\n World!\r\n\r\n");
    }

    #[test]
    fn fold_inside_whitespace_run() {
        // only whitespace in the window is the first of a run
        let dst = encode(&[header("X", "Hello,  World!")], 11).unwrap();
        assert_eq!(&dst[..], b"X: Hello,\r\n  World!\r\n\r\n");
    }

    #[test]
    fn continuation_not_split_at_first_byte() {
        // the continuation " Worldwid" only has whitespace at its first byte
        let err = encode(&[header("X", "Hello,  Worldwid")], 11).unwrap_err();
        assert!(matches!(err, GenerateError::FoldFailure { limit: 11, .. }));
    }

    #[test]
    fn fold_failure_without_break_point() {
        let err = encode(&[header("X", "This is evenlonger!")], 12).unwrap_err();
        assert!(matches!(err, GenerateError::FoldFailure { ref name, limit: 12 } if name == "X"));
    }

    #[test]
    fn never_break_after_colon() {
        let err = encode(&[header("X", "Averylongtoken")], 12).unwrap_err();
        assert!(matches!(err, GenerateError::FoldFailure { .. }));
    }

    #[test]
    fn limit_smaller_than_reserved() {
        assert!(encode(&[header("X", "a b")], 2).is_err());
    }

    #[test]
    fn failure_leaves_dst_untouched() {
        let mut dst = BytesMut::from(&b"HTTP/1.1 200 OK\r\n"[..]);
        let headers = [header("A", "short"), header("X", "This is evenlonger!")];
        let result = HeaderEncoder::new(LineLimit::new(12)).encode(&headers[..], &mut dst);
        assert!(result.is_err());
        assert_eq!(&dst[..], b"HTTP/1.1 200 OK\r\n");
    }
}
