use crate::core::testing::{sink_probe, source_probe};
use crate::core::{
  Broadcast, Completion, GraphBuilder, Sink, StreamError, StreamMaterializer, StreamState, StreamStage,
};

#[test]
fn zero_outputs_are_rejected() {
  assert!(matches!(Broadcast::<u32>::new(0, false), Err(StreamError::InvalidArgument("outputs"))));
}

#[test]
fn shape_exposes_all_ports() {
  let broadcast = Broadcast::<u32>::new(2, true).expect("broadcast");
  let (shape, definition) = broadcast.into_parts();
  assert_eq!(shape.outlets().len(), 2);
  assert_eq!(definition.outlets.len(), 2);
  assert_eq!(definition.inlets, vec![shape.inlet().id()]);
}

#[test]
fn survivors_are_served_after_one_output_cancels() -> Result<(), StreamError> {
  let mut builder = GraphBuilder::new();
  let broadcast = builder.add(Broadcast::<i32>::new(2, false)?);
  let (source, input) = builder.add_source(source_probe::<i32>());
  let (leaver, observer) = builder.add_sink(sink_probe::<i32>());
  let (stayer, collected) = builder.add_sink(Sink::<i32, _>::collect());
  builder.connect(&source.outlet(), &broadcast.inlet())?;
  builder.connect(&broadcast.outlet(0), &leaver.inlet())?;
  builder.connect(&broadcast.outlet(1), &stayer.inlet())?;
  let materialized = builder.build_closed()?.run(&mut StreamMaterializer::new())?;
  let handle = materialized.handle();

  input.send_next(1);
  observer.request(1);
  let _ = handle.drive_until_settled();
  assert_eq!(observer.expect_next(), 1);

  // without eager cancel the remaining output keeps the stage alive
  observer.cancel();
  let _ = handle.drive_until_settled();
  input.send_next(2);
  input.send_next(3);
  input.send_complete();
  let _ = handle.drive_until_settled();

  assert_eq!(collected.poll(), Completion::Ready(Ok(vec![1, 2, 3])));
  assert_eq!(handle.state(), StreamState::Completed);
  Ok(())
}
