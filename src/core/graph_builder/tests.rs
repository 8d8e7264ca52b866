use crate::core::{Flow, FlowShape, GraphBuilder, Merge, Sink, Source, StreamError, StreamNotUsed};

#[test]
fn double_connection_is_rejected() {
  let mut builder = GraphBuilder::new();
  let merge = builder.add(Merge::<u32>::new(2).expect("merge"));
  let (source, _) = builder.add_source(Source::from_iter(0..4_u32));
  builder.connect(&source.outlet(), &merge.inlet(0)).expect("first wiring");
  assert_eq!(builder.connect(&source.outlet(), &merge.inlet(1)), Err(StreamError::PortAlreadyConnected));
}

#[test]
fn foreign_ports_are_rejected() {
  let mut builder = GraphBuilder::new();
  let (source, _) = builder.add_source(Source::from_iter(0..4_u32));
  let mut other = GraphBuilder::new();
  let stray = other.add(Merge::<u32>::new(2).expect("merge"));
  assert_eq!(builder.connect(&source.outlet(), &stray.inlet(0)), Err(StreamError::UnknownPort));
}

#[test]
fn sealing_with_a_dangling_port_fails() {
  let mut builder = GraphBuilder::new();
  let merge = builder.add(Merge::<u32>::new(2).expect("merge"));
  let (source, _) = builder.add_source(Source::from_iter(0..4_u32));
  let (sink, _) = builder.add_sink(Sink::<u32, _>::ignore());
  builder.connect(&source.outlet(), &merge.inlet(0)).expect("wire source");
  builder.connect(&merge.outlet(), &sink.inlet()).expect("wire sink");
  // merge.inlet(1) dangles
  assert!(matches!(builder.build_closed(), Err(StreamError::UnconnectedPort)));
}

#[test]
fn exposed_ports_must_stay_free() {
  let mut builder = GraphBuilder::new();
  let merge = builder.add(Merge::<u32>::new(2).expect("merge"));
  let (source, _) = builder.add_source(Source::from_iter(0..4_u32));
  builder.connect(&source.outlet(), &merge.inlet(0)).expect("wire source");
  let sealed = builder.build_flow(FlowShape::new(merge.inlet(0), merge.outlet()));
  assert!(matches!(sealed, Err(StreamError::PortAlreadyConnected)));
}

#[test]
fn identity_flow_cannot_be_added() {
  let mut builder = GraphBuilder::new();
  let added = builder.add_flow(Flow::<u32, u32, StreamNotUsed>::new());
  assert!(matches!(added, Err(StreamError::InvalidConnection)));
}
