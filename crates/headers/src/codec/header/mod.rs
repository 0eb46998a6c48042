//! Header block processing: line splitting, unfolding and folding.
//!
//! # Components
//!
//! - [`HeaderDecoder`]: Decodes header fields from raw bytes
//!   - Unfolds continuation lines into a single value
//!   - Validates names and rejects lines without a separator
//!   - Enforces the line length limit
//!
//! - [`HeaderEncoder`]: Encodes header fields to bytes
//!   - Keeps storage order
//!   - Folds lines at whitespace to honor the line length limit

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
