use rillflow::core::testing::{sink_probe, source_probe};
use rillflow::core::{
  Broadcast, Completion, Concat, DriveOutcome, Flow, FlowShape, GraphBuilder, Interleave, KeepRight, Merge,
  MergePreferred, OverflowStrategy, Sink, Source, StreamError, StreamHandle, StreamMaterializer, StreamState, Zip,
};

fn assert_all_stages_stopped(handle: &StreamHandle) {
  for (stage, state) in handle.stage_states() {
    assert!(state.is_terminal(), "stage {stage:?} still live in state {state:?}");
  }
}

#[test]
fn feedback_loop_reinjects_transformed_odd_values() -> Result<(), StreamError> {
  let mut builder = GraphBuilder::new();
  let merge = builder.add(Merge::<i32>::new(2)?);
  let broadcast = builder.add(Broadcast::<i32>::new(2, false)?);
  let (source, _) = builder.add_source(Source::from_iter(0..48_i32));
  let (collector, probe) = builder.add_sink(Flow::new().grouped(1000)?.to_mat(sink_probe::<Vec<i32>>(), KeepRight));
  builder.connect(&source.outlet(), &merge.inlet(0))?;
  builder.connect(&merge.outlet(), &broadcast.inlet())?;
  builder.connect(&broadcast.outlet(0), &collector.inlet())?;
  let flow = builder.build_flow(FlowShape::new(merge.inlet(1), broadcast.outlet(1)))?;

  // odd values make one extra round trip, times ten; take caps the loop
  let feedback = Flow::new()
    .filter(|value: &i32| value % 2 == 1)
    .map(|value| value * 10)
    .buffer(24, OverflowStrategy::Backpressure)?
    .take(24);
  let materialized = flow.join(feedback)?.run(&mut StreamMaterializer::new())?;
  let (_, handle) = materialized.into_parts();

  probe.request(1);
  let _ = handle.drive_until_settled();
  let mut group = probe.expect_next();
  probe.expect_complete();
  group.sort_unstable();
  let mut expected: Vec<i32> = (0..48).collect();
  expected.extend((0..48).filter(|value| value % 2 == 1).map(|value| value * 10));
  expected.sort_unstable();
  assert_eq!(group, expected);
  assert_eq!(handle.state(), StreamState::Completed);
  assert_all_stages_stopped(&handle);
  Ok(())
}

#[test]
fn merge_cycle_passes_a_single_value_through() -> Result<(), StreamError> {
  let mut builder = GraphBuilder::new();
  let merge = builder.add(Merge::<&'static str>::new(2)?);
  let broadcast = builder.add(Broadcast::<&'static str>::new(2, true)?);
  let (source, _) = builder.add_source(Source::single("lonely traveler"));
  let (first, completion) = builder.add_sink(Sink::first());
  builder.connect(&source.outlet(), &merge.inlet(0))?;
  builder.connect(&merge.outlet(), &broadcast.inlet())?;
  builder.connect(&broadcast.outlet(0), &first.inlet())?;
  let flow = builder.build_flow(FlowShape::new(merge.inlet(1), broadcast.outlet(1)))?;

  let materialized = flow.join(Flow::new())?.run(&mut StreamMaterializer::new())?;
  assert_eq!(completion.poll(), Completion::Ready(Ok("lonely traveler")));
  assert_eq!(materialized.handle().state(), StreamState::Completed);
  assert_all_stages_stopped(materialized.handle());
  Ok(())
}

#[test]
fn merge_preferred_cycle_passes_a_single_value_through() -> Result<(), StreamError> {
  let mut builder = GraphBuilder::new();
  let merge = builder.add(MergePreferred::<&'static str>::new(1)?);
  let broadcast = builder.add(Broadcast::<&'static str>::new(2, true)?);
  let (source, _) = builder.add_source(Source::single("lonely traveler"));
  let (first, completion) = builder.add_sink(Sink::first());
  builder.connect(&source.outlet(), &merge.preferred())?;
  builder.connect(&merge.outlet(), &broadcast.inlet())?;
  builder.connect(&broadcast.outlet(0), &first.inlet())?;
  let flow = builder.build_flow(FlowShape::new(merge.inlet(0), broadcast.outlet(1)))?;

  let materialized = flow.join(Flow::new())?.run(&mut StreamMaterializer::new())?;
  assert_eq!(completion.poll(), Completion::Ready(Ok("lonely traveler")));
  assert_all_stages_stopped(materialized.handle());
  Ok(())
}

#[test]
fn zip_cycle_pairs_after_an_ignition_element() -> Result<(), StreamError> {
  let mut builder = GraphBuilder::new();
  let zip = builder.add(Zip::<&'static str, &'static str>::new());
  let broadcast = builder.add(Broadcast::<(&'static str, &'static str)>::new(2, true)?);
  let (source, _) = builder.add_source(Source::from_iter(["traveler1", "traveler2"]));
  let (collector, completion) = builder.add_sink(Flow::new().take(2).to_mat(Sink::collect(), KeepRight));
  builder.connect(&source.outlet(), &zip.in0())?;
  builder.connect(&zip.outlet(), &broadcast.inlet())?;
  builder.connect(&broadcast.outlet(0), &collector.inlet())?;
  let flow = builder.build_flow(FlowShape::new(zip.in1(), broadcast.outlet(1)))?;

  // the loop strips pairs back to their first half and merges in a single
  // ignition element, without which no pair could ever form
  let mut feedback_builder = GraphBuilder::new();
  let feedback_merge = feedback_builder.add(Merge::<&'static str>::new(2)?);
  let (ignition, _) = feedback_builder.add_source(Source::single("ignition"));
  let (unzip, _) = feedback_builder.add_flow(Flow::new().map(|pair: (&'static str, &'static str)| pair.0))?;
  feedback_builder.connect(&ignition.outlet(), &feedback_merge.inlet(0))?;
  feedback_builder.connect(&unzip.outlet(), &feedback_merge.inlet(1))?;
  let feedback = feedback_builder.build_flow(FlowShape::new(unzip.inlet(), feedback_merge.outlet()))?;

  let materialized = flow.join(feedback)?.run(&mut StreamMaterializer::new())?;
  assert_eq!(
    completion.poll(),
    Completion::Ready(Ok(vec![("traveler1", "ignition"), ("traveler2", "traveler1")]))
  );
  assert_all_stages_stopped(materialized.handle());
  Ok(())
}

#[test]
fn concat_cycle_passes_an_injected_value_through() -> Result<(), StreamError> {
  let mut builder = GraphBuilder::new();
  let concat = builder.add(Concat::<&'static str>::new(2)?);
  let broadcast = builder.add(Broadcast::<&'static str>::new(2, true)?);
  let (source, probe) = builder.add_source(source_probe::<&'static str>());
  let (first, completion) = builder.add_sink(Sink::first());
  builder.connect(&source.outlet(), &concat.inlet(0))?;
  builder.connect(&concat.outlet(), &broadcast.inlet())?;
  builder.connect(&broadcast.outlet(0), &first.inlet())?;
  let flow = builder.build_flow(FlowShape::new(concat.inlet(1), broadcast.outlet(1)))?;

  let materialized = flow.join(Flow::new())?.run(&mut StreamMaterializer::new())?;
  let (_, handle) = materialized.into_parts();
  assert_eq!(handle.state(), StreamState::Running);

  probe.send_next("lonely traveler");
  let _ = handle.drive_until_settled();
  assert_eq!(completion.poll(), Completion::Ready(Ok("lonely traveler")));
  assert_eq!(handle.state(), StreamState::Completed);
  assert_all_stages_stopped(&handle);
  Ok(())
}

#[test]
fn interleave_cycle_passes_a_single_value_through() -> Result<(), StreamError> {
  let mut builder = GraphBuilder::new();
  let interleave = builder.add(Interleave::<&'static str>::new(2, 1)?);
  let broadcast = builder.add(Broadcast::<&'static str>::new(2, true)?);
  let (source, _) = builder.add_source(Source::single("lonely traveler"));
  let (first, completion) = builder.add_sink(Sink::first());
  builder.connect(&source.outlet(), &interleave.inlet(0))?;
  builder.connect(&interleave.outlet(), &broadcast.inlet())?;
  builder.connect(&broadcast.outlet(0), &first.inlet())?;
  let flow = builder.build_flow(FlowShape::new(interleave.inlet(1), broadcast.outlet(1)))?;

  let materialized = flow.join(Flow::new())?.run(&mut StreamMaterializer::new())?;
  assert_eq!(completion.poll(), Completion::Ready(Ok("lonely traveler")));
  assert_all_stages_stopped(materialized.handle());
  Ok(())
}

#[test]
fn unseeded_zip_cycle_stalls_until_cancelled() -> Result<(), StreamError> {
  let mut builder = GraphBuilder::new();
  let zip = builder.add(Zip::<&'static str, &'static str>::new());
  let broadcast = builder.add(Broadcast::<(&'static str, &'static str)>::new(2, true)?);
  let (source, _) = builder.add_source(Source::from_iter(["traveler1", "traveler2"]));
  let (observer, probe) = builder.add_sink(sink_probe::<(&'static str, &'static str)>());
  builder.connect(&source.outlet(), &zip.in0())?;
  builder.connect(&zip.outlet(), &broadcast.inlet())?;
  builder.connect(&broadcast.outlet(0), &observer.inlet())?;
  let flow = builder.build_flow(FlowShape::new(zip.in1(), broadcast.outlet(1)))?;

  // no ignition element: the loop can never produce its first pair
  let feedback = Flow::new().map(|pair: (&'static str, &'static str)| pair.0);
  let materialized = flow.join(feedback)?.run(&mut StreamMaterializer::new())?;
  let (_, handle) = materialized.into_parts();
  assert_eq!(handle.state(), StreamState::Running);

  probe.request(1);
  assert_eq!(handle.drive_until_settled(), StreamState::Running);
  assert_eq!(handle.drive(), DriveOutcome::Idle);
  assert!(probe.try_next().is_none());

  handle.cancel();
  assert_eq!(handle.state(), StreamState::Cancelled);
  assert_all_stages_stopped(&handle);
  Ok(())
}
