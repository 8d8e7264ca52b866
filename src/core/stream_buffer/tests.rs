use crate::core::{OverflowStrategy, StreamBuffer, StreamError};

fn filled(strategy: OverflowStrategy) -> StreamBuffer<u32> {
  let mut buffer = StreamBuffer::new(3, strategy).expect("buffer");
  for value in 1..=3 {
    assert_eq!(buffer.offer(value), Ok(true));
  }
  buffer
}

fn drain(buffer: &mut StreamBuffer<u32>) -> Vec<u32> {
  let mut out = Vec::new();
  while let Some(value) = buffer.poll() {
    out.push(value);
  }
  out
}

#[test]
fn zero_capacity_is_rejected() {
  assert_eq!(
    StreamBuffer::<u32>::new(0, OverflowStrategy::Backpressure).err(),
    Some(StreamError::InvalidArgument("capacity"))
  );
}

#[test]
fn preserves_fifo_order_within_capacity() {
  let mut buffer = filled(OverflowStrategy::Backpressure);
  assert!(buffer.is_full());
  assert_eq!(drain(&mut buffer), vec![1, 2, 3]);
  assert!(buffer.is_empty());
}

#[test]
fn backpressure_and_fail_reject_overflow() {
  for strategy in [OverflowStrategy::Backpressure, OverflowStrategy::Fail] {
    let mut buffer = filled(strategy);
    assert_eq!(buffer.offer(4), Err(StreamError::BufferOverflow));
  }
}

#[test]
fn drop_head_evicts_the_oldest() {
  let mut buffer = filled(OverflowStrategy::DropHead);
  assert_eq!(buffer.offer(4), Ok(true));
  assert_eq!(drain(&mut buffer), vec![2, 3, 4]);
}

#[test]
fn drop_tail_evicts_the_youngest() {
  let mut buffer = filled(OverflowStrategy::DropTail);
  assert_eq!(buffer.offer(4), Ok(true));
  assert_eq!(drain(&mut buffer), vec![1, 2, 4]);
}

#[test]
fn drop_buffer_clears_everything_first() {
  let mut buffer = filled(OverflowStrategy::DropBuffer);
  assert_eq!(buffer.offer(4), Ok(true));
  assert_eq!(drain(&mut buffer), vec![4]);
}

#[test]
fn drop_new_discards_the_incoming_element() {
  let mut buffer = filled(OverflowStrategy::DropNew);
  assert_eq!(buffer.offer(4), Ok(false));
  assert_eq!(drain(&mut buffer), vec![1, 2, 3]);
}
