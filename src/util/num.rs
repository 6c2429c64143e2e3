use crate::{
    error::RuntimeError,
    span::Span,
};

/// Promotes an integer to a float for mixed arithmetic.
///
/// The language promotes silently, so very large magnitudes round to the
/// nearest representable `f64`; that is the documented behavior of mixed
/// arithmetic, not an error.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a list index into a checked `usize` offset.
///
/// Negative indices and indices at or beyond `len` are out of range.
///
/// # Errors
/// Returns `RuntimeError::IndexOutOfRange` when the index does not name an
/// element.
pub fn list_index(index: i64, len: usize, span: Span) -> Result<usize, RuntimeError> {
    usize::try_from(index)
        .ok()
        .filter(|offset| *offset < len)
        .ok_or(RuntimeError::IndexOutOfRange { index, len, span })
}

/// Converts a repetition count into a `usize`.
///
/// # Errors
/// Returns `RuntimeError::InvalidArgument` for negative counts.
pub fn repeat_count(count: i64, span: Span) -> Result<usize, RuntimeError> {
    usize::try_from(count).map_err(|_| {
                              RuntimeError::InvalidArgument { details:
                                                                  format!("repetition count must not be negative, got {count}"),
                                                              span }
                          })
}
