use super::StreamError;

/// Validates that a stage constructor argument is positive.
///
/// # Errors
///
/// Returns `StreamError::InvalidArgument` carrying `name` when `value` is
/// zero.
pub(crate) const fn validate_positive_argument(name: &'static str, value: usize) -> Result<(), StreamError> {
  if value == 0 {
    return Err(StreamError::InvalidArgument(name));
  }
  Ok(())
}
