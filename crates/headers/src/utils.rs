//! Utility macros shared by the codec and protocol modules.

/// Returns early with an error if a condition is not met.
///
/// This mirrors `assert!`, but hands the error back to the caller instead of
/// panicking, which keeps the validation steps of the decoder flat.
///
/// # Example
///
/// ```ignore
/// ensure!(limit.allows(line_len), ParseError::line_too_long(line_len, limit, offset));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
