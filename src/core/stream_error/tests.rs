use crate::core::StreamError;

#[test]
fn display_names_the_failing_argument() {
  let error = StreamError::InvalidArgument("inputs");
  assert_eq!(error.to_string(), "argument must be positive: inputs");
}

#[test]
fn errors_compare_by_variant() {
  assert_eq!(StreamError::BufferOverflow, StreamError::BufferOverflow);
  assert_ne!(StreamError::Cancelled, StreamError::NoSuchElement);
}
