use crate::core::{
  Completion, GraphBuilder, Interleave, Sink, Source, StreamError, StreamMaterializer, StreamState, StreamStage,
};

#[test]
fn zero_inputs_are_rejected() {
  assert!(matches!(Interleave::<u32>::new(0, 1), Err(StreamError::InvalidArgument("inputs"))));
}

#[test]
fn zero_segment_is_rejected() {
  assert!(matches!(Interleave::<u32>::new(2, 0), Err(StreamError::InvalidArgument("segment_size"))));
}

#[test]
fn shape_exposes_all_ports() {
  let interleave = Interleave::<u32>::new(2, 3).expect("interleave");
  let (shape, definition) = interleave.into_parts();
  assert_eq!(shape.inlets().len(), 2);
  assert_eq!(definition.inlets.len(), 2);
  assert_eq!(definition.outlets, vec![shape.outlet().id()]);
}

#[test]
fn rotates_segments_across_live_inputs() -> Result<(), StreamError> {
  let mut builder = GraphBuilder::new();
  let interleave = builder.add(Interleave::<i32>::new(2, 2)?);
  let (left, _) = builder.add_source(Source::from_iter([1, 2, 3, 4, 5]));
  let (right, _) = builder.add_source(Source::from_iter([10, 20]));
  let (sink, collected) = builder.add_sink(Sink::<i32, _>::collect());
  builder.connect(&left.outlet(), &interleave.inlet(0))?;
  builder.connect(&right.outlet(), &interleave.inlet(1))?;
  builder.connect(&interleave.outlet(), &sink.inlet())?;
  let materialized = builder.build_closed()?.run(&mut StreamMaterializer::new())?;

  // two per side per turn; the exhausted side is skipped afterwards
  assert_eq!(collected.poll(), Completion::Ready(Ok(vec![1, 2, 10, 20, 3, 4, 5])));
  assert_eq!(materialized.handle().state(), StreamState::Completed);
  Ok(())
}
