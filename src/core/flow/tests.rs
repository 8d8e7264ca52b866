use crate::core::{
  Completion, Flow, KeepBoth, KeepRight, OverflowStrategy, Sink, Source, StreamError, StreamMaterializer,
  StreamNotUsed, StreamState,
};

#[test]
fn joining_two_identity_flows_is_rejected() {
  let joined = Flow::<u32, u32, StreamNotUsed>::new().join(Flow::new());
  assert!(matches!(joined, Err(StreamError::InvalidConnection)));
}

#[test]
fn grouped_rejects_zero_size() {
  let grouped = Flow::<u32, u32, StreamNotUsed>::new().grouped(0);
  assert!(matches!(grouped, Err(StreamError::InvalidArgument("size"))));
}

#[test]
fn buffer_rejects_zero_capacity() {
  let buffered = Flow::<u32, u32, StreamNotUsed>::new().buffer(0, OverflowStrategy::Backpressure);
  assert!(matches!(buffered, Err(StreamError::InvalidArgument("capacity"))));
}

#[test]
fn take_zero_completes_without_consuming() {
  let graph = Source::from_iter(1..=5_i32).via(Flow::new().take(0)).to_mat(Sink::collect(), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.handle().state(), StreamState::Completed);
  assert_eq!(materialized.value().poll(), Completion::Ready(Ok(Vec::new())));
}

#[test]
fn keep_both_carries_both_materialized_values() {
  let graph = Source::from_iter(1..=2_i32).to_mat(Sink::collect(), KeepBoth);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  let (_, completion) = materialized.value().clone();
  assert_eq!(completion.poll(), Completion::Ready(Ok(vec![1, 2])));
}

#[test]
fn composed_flows_apply_in_order() {
  let doubled_then_offset = Flow::new().map(|value: i32| value * 2).via(Flow::new().map(|value| value + 1));
  let graph = Source::from_iter(1..=3_i32).via(doubled_then_offset).to_mat(Sink::collect(), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.value().poll(), Completion::Ready(Ok(vec![3, 5, 7])));
}
