//! Data model of a message header block.
//!
//! # Components
//!
//! - [`HeaderName`]: field name, compared ignoring ASCII case, kept with its
//!   original casing for output
//! - [`HeaderValue`]: field value, free of CR and LF
//! - [`Header`]: one name/value pair
//! - [`LineLimit`]: the line length limit, the only configuration option
//! - [`MessageHeaders`]: the ordered header store with query and mutation API
//!
//! - **Error Handling** ([`error`]):
//!   - [`HeaderError`]: Top-level error type
//!   - [`ParseError`]: Header block decoding errors
//!   - [`GenerateError`]: Header block encoding errors
//!   - [`InvalidHeader`]: Name/value construction errors

mod header;
pub use header::Header;

pub(crate) mod name;
pub use name::HeaderName;

mod value;
pub use value::HeaderValue;

mod limit;
pub use limit::LineLimit;

mod message_headers;
pub use message_headers::GetAll;
pub use message_headers::MessageHeaders;

pub mod error;
pub use error::GenerateError;
pub use error::HeaderError;
pub use error::InvalidHeader;
pub use error::ParseError;
