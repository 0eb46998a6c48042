//! Codec module for decoding and encoding message header blocks
//!
//! - Decoding: [`HeaderDecoder`] splits a raw buffer into header fields,
//!   unfolding continuation lines, and reports where the body starts
//! - Encoding: [`HeaderEncoder`] renders header fields back to bytes, folding
//!   lines that exceed the configured limit
//!
//! Both sides work on complete in-memory buffers. Reading the bytes off a
//! socket, and everything after the empty line, is the caller's business.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_headers::codec::{HeaderDecoder, HeaderEncoder};
//! use micro_headers::protocol::LineLimit;
//! use tokio_util::codec::Encoder;
//!
//! let mut headers = Vec::new();
//! let body_offset = HeaderDecoder::new(LineLimit::UNLIMITED)
//!     .decode(b"Subject: This\r\n is a test\r\n\r\nbody", &mut headers)
//!     .unwrap();
//! assert_eq!(body_offset, 29);
//!
//! let mut dst = BytesMut::new();
//! HeaderEncoder::new(LineLimit::new(16)).encode(&headers[..], &mut dst).unwrap();
//! assert_eq!(&dst[..], b"Subject: This\r\n is a test\r\n\r\n");
//! ```

mod header;

pub use header::HeaderDecoder;
pub use header::HeaderEncoder;
