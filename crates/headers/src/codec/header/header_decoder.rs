//! Header block decoder: splits raw bytes into header fields.
//!
//! The decoder scans CRLF-delimited lines from the start of the buffer until
//! it meets the empty line that ends the header block. Lines starting with a
//! space or tab continue the previous field and are unfolded into its value.
//!
//! # Line terminators
//!
//! Only the exact two-byte sequence CRLF ends a line. A lone CR or LF is
//! ordinary data to the scanner; inside a header line it makes the value
//! invalid, after the header block it is simply part of the body.
//!
//! # Failure policy
//!
//! The decoder appends into the caller's list as it goes and never rolls
//! back: fields decoded before a bad line stay in `dst`. Running out of
//! input before the blank line is accepted as long as at least one complete
//! line was consumed; the returned offset then points at the unconsumed rest.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::ensure;
use crate::protocol::name::is_visible;
use crate::protocol::{Header, HeaderName, HeaderValue, LineLimit, ParseError};

const CRLF: &[u8] = b"\r\n";

/// Decoder for a complete in-memory header block.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDecoder {
    limit: LineLimit,
}

impl HeaderDecoder {
    pub fn new(limit: LineLimit) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> LineLimit {
        self.limit
    }

    /// Decodes the header block at the start of `src`, appending every field
    /// to `dst` in wire order.
    ///
    /// # Returns
    ///
    /// The offset of the first byte after the header block, i.e. where the
    /// body starts.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - A physical line, CRLF included, exceeds the line limit
    /// - A non-blank line has no colon
    /// - A name is empty or contains bytes outside visible ASCII
    /// - A value contains a lone CR or LF
    /// - No line at all could be consumed, or an unterminated continuation
    ///   line trails the buffer
    pub fn decode(&self, src: &[u8], dst: &mut Vec<Header>) -> Result<usize, ParseError> {
        let decoded_before = dst.len();
        let mut offset = 0;

        while let Some(line_end) = find_crlf(src, offset) {
            self.check_line_len(offset, line_end)?;

            // blank line: end of the header block
            if line_end == offset {
                offset += CRLF.len();
                break;
            }

            let line = &src[offset..line_end];
            let colon = line.iter().position(|b| *b == b':').ok_or_else(|| ParseError::missing_colon(offset))?;

            let name = &line[..colon];
            ensure!(!name.is_empty() && name.iter().all(|b| is_visible(*b)), ParseError::malformed_name(offset));

            let first = &line[colon + 1..];
            ensure!(!has_line_break(first), ParseError::malformed_value(offset));
            let mut value = Unfolder::new(first);

            let mut next = line_end + CRLF.len();
            loop {
                match find_crlf(src, next) {
                    Some(next_end) if next_end > next && is_wsp(src[next]) => {
                        self.check_line_len(next, next_end)?;
                        let continuation = &src[next..next_end];
                        ensure!(!has_line_break(continuation), ParseError::malformed_value(next));
                        value.push(continuation);
                        next = next_end + CRLF.len();
                    }
                    Some(_) => break,
                    None => {
                        // a continuation that never gets its CRLF
                        ensure!(!src.get(next).is_some_and(|b| is_wsp(*b)), ParseError::truncated_input(next));
                        break;
                    }
                }
            }

            let name = HeaderName::from_validated(Bytes::copy_from_slice(name));
            dst.push(Header::new(name, value.finish()));
            offset = next;
        }

        ensure!(offset > 0, ParseError::truncated_input(offset));

        trace!(body_offset = offset, header_count = dst.len() - decoded_before, "decoded header block");
        Ok(offset)
    }

    fn check_line_len(&self, start: usize, end: usize) -> Result<(), ParseError> {
        let line_len = end - start + CRLF.len();
        match self.limit.get() {
            Some(limit) if line_len > limit.get() => Err(ParseError::line_too_long(line_len, limit.get(), start)),
            _ => Ok(()),
        }
    }
}

/// Merges a field's first line and its continuation lines into one value.
///
/// Each continuation loses its leading folding whitespace and is joined with
/// a single space; whitespace before the line break is kept. A field without
/// continuations never touches the intermediate buffer.
struct Unfolder<'a> {
    first: &'a [u8],
    folded: Option<BytesMut>,
}

impl<'a> Unfolder<'a> {
    fn new(first: &'a [u8]) -> Self {
        Self { first, folded: None }
    }

    fn push(&mut self, continuation: &[u8]) {
        let first = self.first;
        let buf = self.folded.get_or_insert_with(|| BytesMut::from(first));
        buf.put_u8(b' ');
        buf.put_slice(trim_wsp_start(continuation));
    }

    fn finish(self) -> HeaderValue {
        let value = match self.folded {
            Some(buf) => {
                let buf = buf.freeze();
                buf.slice_ref(trim_wsp(&buf))
            }
            None => Bytes::copy_from_slice(trim_wsp(self.first)),
        };
        HeaderValue::from_validated(value)
    }
}

fn find_crlf(src: &[u8], from: usize) -> Option<usize> {
    src.get(from..)?.windows(CRLF.len()).position(|window| window == CRLF).map(|index| from + index)
}

/// Space or horizontal tab, the folding whitespace of RFC 2822.
pub(crate) fn is_wsp(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn has_line_break(bytes: &[u8]) -> bool {
    bytes.iter().any(|b| *b == b'\r' || *b == b'\n')
}

fn trim_wsp_start(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !is_wsp(*b)).unwrap_or(bytes.len());
    &bytes[start..]
}

fn trim_wsp_end(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|b| !is_wsp(*b)).map_or(0, |index| index + 1);
    &bytes[..end]
}

fn trim_wsp(bytes: &[u8]) -> &[u8] {
    trim_wsp_end(trim_wsp_start(bytes))
}
