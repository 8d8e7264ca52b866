use crate::core::{FlowShape, Inlet, Outlet};

struct Opaque;

#[test]
fn inlets_copy_for_any_element_type() {
  let inlet = Inlet::<Opaque>::new();
  let copy = inlet;
  assert_eq!(inlet, copy);
}

#[test]
fn shape_accessors_hand_out_port_copies() {
  let shape = FlowShape::new(Inlet::<Opaque>::new(), Outlet::<Opaque>::new());
  assert_eq!(shape.inlet(), shape.inlet());
  assert_ne!(shape.inlet().id(), shape.outlet().id());
}
