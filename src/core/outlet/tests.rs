use crate::core::Outlet;

struct Opaque;

#[test]
fn outlets_copy_for_any_element_type() {
  let outlet = Outlet::<Opaque>::new();
  let copy = outlet;
  assert_eq!(outlet, copy);
}

#[test]
fn distinct_outlets_carry_distinct_identifiers() {
  assert_ne!(Outlet::<u32>::new(), Outlet::<u32>::new());
}
