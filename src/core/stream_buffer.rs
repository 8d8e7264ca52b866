//! Bounded FIFO buffer with overflow policies.

#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use super::{OverflowStrategy, StreamError, validate_positive_argument};

/// Bounded FIFO buffer whose behavior on overflow is governed by an
/// [`OverflowStrategy`].
#[derive(Debug)]
pub struct StreamBuffer<T> {
  items:    VecDeque<T>,
  capacity: usize,
  strategy: OverflowStrategy,
}

impl<T> StreamBuffer<T> {
  /// Creates a buffer with the given capacity and overflow strategy.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `capacity` is zero.
  pub fn new(capacity: usize, strategy: OverflowStrategy) -> Result<Self, StreamError> {
    validate_positive_argument("capacity", capacity)?;
    Ok(Self { items: VecDeque::with_capacity(capacity), capacity, strategy })
  }

  /// Offers an element to the buffer.
  ///
  /// Returns `Ok(true)` when the element was enqueued and `Ok(false)` when
  /// the strategy dropped it.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::BufferOverflow` when the buffer is full and the
  /// strategy is `Fail` or `Backpressure` (the latter means the caller
  /// violated the pull gate).
  pub fn offer(&mut self, value: T) -> Result<bool, StreamError> {
    if self.items.len() < self.capacity {
      self.items.push_back(value);
      return Ok(true);
    }

    match self.strategy {
      | OverflowStrategy::Backpressure | OverflowStrategy::Fail => Err(StreamError::BufferOverflow),
      | OverflowStrategy::DropHead => {
        let _ = self.items.pop_front();
        self.items.push_back(value);
        Ok(true)
      },
      | OverflowStrategy::DropTail => {
        let _ = self.items.pop_back();
        self.items.push_back(value);
        Ok(true)
      },
      | OverflowStrategy::DropBuffer => {
        self.items.clear();
        self.items.push_back(value);
        Ok(true)
      },
      | OverflowStrategy::DropNew => Ok(false),
    }
  }

  /// Removes and returns the oldest buffered element.
  #[must_use]
  pub fn poll(&mut self) -> Option<T> {
    self.items.pop_front()
  }

  /// Returns `true` when the buffer holds no elements.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Returns `true` when every slot is occupied.
  #[must_use]
  pub fn is_full(&self) -> bool {
    self.items.len() == self.capacity
  }

  /// Returns the number of buffered elements.
  #[must_use]
  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Returns the configured capacity.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns the configured overflow strategy.
  #[must_use]
  pub const fn strategy(&self) -> OverflowStrategy {
    self.strategy
  }
}
