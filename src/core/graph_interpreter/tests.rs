use crate::core::testing::{ProbeEvent, TestSinkProbe, sink_probe};
use crate::core::{
  Completion, DriveOutcome, Flow, KeepRight, MaterializerSettings, OverflowStrategy, Sink, Source, StageState,
  StreamError, StreamHandle, StreamMaterializer, StreamState,
};

#[test]
fn linear_pipeline_runs_to_completion() {
  let graph = Source::from_iter(1..=3_i32)
    .via(Flow::new().map(|value| value * 2))
    .to_mat(Sink::fold(0, |acc, value| acc + value), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  let (completion, handle) = materialized.into_parts();
  assert_eq!(handle.state(), StreamState::Completed);
  assert_eq!(completion.poll(), Completion::Ready(Ok(12)));
  assert!(handle.stage_states().iter().all(|(_, state)| *state == StageState::Completed));
}

#[test]
fn first_cancels_the_rest_of_the_stream() {
  let graph = Source::from_iter(5..100_i32).to_mat(Sink::first(), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.value().poll(), Completion::Ready(Ok(5)));
  assert_eq!(materialized.handle().state(), StreamState::Completed);
}

#[test]
fn filter_and_take_preserve_order() {
  let graph = Source::from_iter(1..=10_i32)
    .via(Flow::new().filter(|value| value % 2 == 1).take(3))
    .to_mat(Sink::collect(), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.value().poll(), Completion::Ready(Ok(vec![1, 3, 5])));
}

#[test]
fn grouped_flushes_the_partial_group() {
  let graph = Source::from_iter(1..=6_i32)
    .via(Flow::new().grouped(4).expect("grouped"))
    .to_mat(Sink::collect(), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.value().poll(), Completion::Ready(Ok(vec![vec![1, 2, 3, 4], vec![5, 6]])));
}

#[test]
fn drive_after_completion_is_idle() {
  let graph = Source::from_iter(0..4_u32).to_mat(Sink::ignore(), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.handle().state(), StreamState::Completed);
  assert_eq!(materialized.handle().drive(), DriveOutcome::Idle);
}

#[test]
fn zero_input_buffer_is_rejected() {
  let mut materializer = StreamMaterializer::with_settings(MaterializerSettings::new().with_input_buffer(0));
  let graph = Source::from_iter(0..4_u32).to_mat(Sink::ignore(), KeepRight);
  assert!(matches!(graph.run(&mut materializer), Err(StreamError::InvalidArgument("input_buffer"))));
}

/// Runs `1..=10` through a four-slot buffer stage with two-slot connection
/// buffers, so every strategy except backpressure has to overflow before
/// the probe grants any demand.
fn buffered_probe(strategy: OverflowStrategy) -> (TestSinkProbe<i32>, StreamHandle) {
  let mut materializer = StreamMaterializer::with_settings(MaterializerSettings::new().with_input_buffer(2));
  let graph = Source::from_iter(1..=10_i32)
    .via(Flow::new().buffer(4, strategy).expect("buffer"))
    .to_mat(sink_probe::<i32>(), KeepRight);
  graph.run(&mut materializer).expect("run").into_parts()
}

fn delivered(probe: &TestSinkProbe<i32>, handle: &StreamHandle) -> Vec<i32> {
  probe.request(16);
  let _ = handle.drive_until_settled();
  let mut seen = Vec::new();
  loop {
    match probe.try_next() {
      | Some(ProbeEvent::Next(value)) => seen.push(value),
      | Some(ProbeEvent::Complete) => break,
      | other => panic!("expected an element or completion, got {other:?}"),
    }
  }
  seen
}

#[test]
fn backpressure_buffer_delivers_everything() {
  let (probe, handle) = buffered_probe(OverflowStrategy::Backpressure);
  assert_eq!(handle.state(), StreamState::Running);
  assert_eq!(delivered(&probe, &handle), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
  assert_eq!(handle.state(), StreamState::Completed);
}

#[test]
fn drop_head_keeps_the_newest_elements() {
  let (probe, handle) = buffered_probe(OverflowStrategy::DropHead);
  assert_eq!(delivered(&probe, &handle), vec![1, 2, 7, 8, 9, 10]);
}

#[test]
fn drop_tail_keeps_the_oldest_elements() {
  let (probe, handle) = buffered_probe(OverflowStrategy::DropTail);
  assert_eq!(delivered(&probe, &handle), vec![1, 2, 3, 4, 5, 10]);
}

#[test]
fn drop_new_rejects_arrivals_at_capacity() {
  let (probe, handle) = buffered_probe(OverflowStrategy::DropNew);
  assert_eq!(delivered(&probe, &handle), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn drop_buffer_clears_on_overflow() {
  let (probe, handle) = buffered_probe(OverflowStrategy::DropBuffer);
  assert_eq!(delivered(&probe, &handle), vec![1, 2, 7, 8, 9, 10]);
}

#[test]
fn fail_strategy_fails_the_run() {
  let (probe, handle) = buffered_probe(OverflowStrategy::Fail);
  assert_eq!(handle.state(), StreamState::Failed);
  assert_eq!(handle.failure(), Some(StreamError::BufferOverflow));
  assert_eq!(probe.expect_error(), StreamError::BufferOverflow);
  assert!(handle.stage_states().iter().all(|(_, state)| state.is_terminal()));
}
