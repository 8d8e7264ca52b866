use crate::core::{Buffer, OverflowStrategy, StreamError};

#[test]
fn zero_capacity_is_rejected() {
  assert!(matches!(
    Buffer::<u32>::new(0, OverflowStrategy::Backpressure),
    Err(StreamError::InvalidArgument("capacity"))
  ));
}
