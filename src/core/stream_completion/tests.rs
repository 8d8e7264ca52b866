use crate::core::{Completion, StreamCompletion, StreamError};

#[test]
fn poll_reports_pending_until_completed() {
  let completion = StreamCompletion::<u32>::new();
  assert_eq!(completion.poll(), Completion::Pending);
  completion.complete(Ok(7));
  assert_eq!(completion.poll(), Completion::Ready(Ok(7)));
}

#[test]
fn first_resolution_wins() {
  let completion = StreamCompletion::<u32>::new();
  completion.complete(Ok(1));
  completion.complete(Err(StreamError::Cancelled));
  assert_eq!(completion.poll(), Completion::Ready(Ok(1)));
}

#[test]
fn try_take_consumes_the_result() {
  let completion = StreamCompletion::<u32>::new();
  completion.complete(Err(StreamError::NoSuchElement));
  assert_eq!(completion.try_take(), Some(Err(StreamError::NoSuchElement)));
  assert_eq!(completion.try_take(), None);
}

#[test]
fn clones_observe_the_same_state() {
  let completion = StreamCompletion::<&'static str>::new();
  let observer = completion.clone();
  completion.complete(Ok("done"));
  assert_eq!(observer.poll(), Completion::Ready(Ok("done")));
}
