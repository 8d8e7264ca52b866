use crate::core::{Merge, StreamError, StreamStage};

#[test]
fn zero_inputs_are_rejected() {
  assert!(matches!(Merge::<u32>::new(0), Err(StreamError::InvalidArgument("inputs"))));
}

#[test]
fn shape_exposes_all_ports() {
  let merge = Merge::<u32>::new(3).expect("merge");
  let (shape, definition) = merge.into_parts();
  assert_eq!(shape.inlets().len(), 3);
  assert_eq!(definition.inlets.len(), 3);
  assert_eq!(definition.outlets, vec![shape.outlet().id()]);
}
