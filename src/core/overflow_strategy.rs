/// Policy applied when an element is offered to a full bounded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowStrategy {
  /// Stop pulling upstream until a slot frees up.
  Backpressure,
  /// Drop the oldest buffered element to make room.
  DropHead,
  /// Drop the youngest buffered element to make room.
  DropTail,
  /// Drop the entire buffer contents to make room.
  DropBuffer,
  /// Drop the incoming element.
  DropNew,
  /// Fail the stream with [`StreamError::BufferOverflow`](super::StreamError::BufferOverflow).
  Fail,
}
