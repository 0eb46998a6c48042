//! Message header parsing and serialization
//!
//! This crate handles the header section of internet messages in the
//! RFC 2822 style shared by HTTP and SIP: `Name: Value` lines ended by CRLF,
//! closed by an empty line, optionally followed by a body that is treated as
//! opaque bytes.
//!
//! # Features
//!
//! - Header block decoding with continuation line unfolding
//! - Configurable maximum line length, enforced on input
//! - Serialization with line folding to honor the same limit
//! - Case-insensitive lookup that preserves the original name casing
//! - Repeated fields, either as separate lines or comma-joined
//! - Body offset reporting, with zero-copy body access through [`bytes::Bytes`]
//!
//! # Example
//!
//! ```
//! use micro_headers::protocol::{HeaderName, HeaderValue, LineLimit, MessageHeaders};
//!
//! let raw = b"Via: SIP/2.0/UDP a.example.com\r\n\
//!             Subject: This\r\n is a test\r\n\
//!             via: SIP/2.0/UDP b.example.com\r\n\
//!             \r\n\
//!             body";
//!
//! let mut headers = MessageHeaders::new();
//! let body_offset = headers.parse(raw).unwrap();
//! assert_eq!(&raw[body_offset..], b"body");
//!
//! assert!(headers.contains("SUBJECT"));
//! assert_eq!(headers.get("subject").unwrap(), "This is a test");
//! assert_eq!(headers.get("Via").unwrap(), "SIP/2.0/UDP a.example.com,SIP/2.0/UDP b.example.com");
//! assert_eq!(headers.get_all("Via").count(), 2);
//! assert_eq!(headers.get("X-Missing"), None);
//!
//! headers.remove("Via");
//! headers.set_one(HeaderName::from_static("Subject"), HeaderValue::from_static("Hello, World!"));
//! headers.set_line_limit(LineLimit::new(17));
//!
//! assert_eq!(&headers.generate().unwrap()[..], b"Subject: Hello,\r\n World!\r\n\r\n");
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: the data model and the [`protocol::MessageHeaders`] store
//! - [`codec`]: the decoder and encoder working on raw bytes
//!
//! Data flows one way per operation: raw bytes are decoded into the store,
//! queried and mutated there, then encoded back into raw bytes.
//!
//! # Error Handling
//!
//! - [`protocol::ParseError`]: decoding errors, with the offending line offset
//! - [`protocol::GenerateError`]: encoding errors, notably fold failures
//! - [`protocol::InvalidHeader`]: invalid names or values built by hand
//! - [`protocol::HeaderError`]: top-level error wrapping the three above
//!
//! Decoding never rolls back: fields decoded before a bad line stay in the
//! store. Encoding either writes the whole block or nothing.
//!
//! # Limitations
//!
//! - Header semantics (e.g. that `Content-Length` is numeric) are not checked
//! - Values are bytes; no character set handling beyond ASCII compatibility
//! - No incremental parsing: the buffer must hold the whole header block

pub mod codec;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
