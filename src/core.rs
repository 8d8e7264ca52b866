//! Core dataflow engine: typed ports, junction stages, graph building and a
//! cycle-capable cooperative interpreter.

/// Bounded buffer stage with overflow strategies.
mod buffer;
/// Poll result of a completion handle.
mod completion;
/// Connection runtime state and demand accounting.
mod connection;
/// Result of one interpreter drive pass.
mod drive_outcome;
/// Linear stage algebra and one-port operators.
mod flow;
/// Wiring DSL for arbitrary, possibly cyclic topologies.
mod graph_builder;
/// Cooperative interpreter over a sealed graph.
mod graph_interpreter;
/// Typed inlet ports.
mod inlet;
/// Fan-in and fan-out junction stages.
mod junction;
/// Materialization rule keeping both values.
mod keep_both;
/// Materialization rule keeping the left value.
mod keep_left;
/// Materialization rule keeping neither value.
mod keep_none;
/// Materialization rule keeping the right value.
mod keep_right;
/// Materialized-value combination rules.
mod mat_combine_rule;
/// Result of running a graph.
mod materialized;
/// Turns runnable graphs into running interpreters.
mod materializer;
/// Tunables for materialization.
mod materializer_settings;
/// Overflow policies for bounded buffers.
mod overflow_strategy;
/// Typed outlet ports.
mod outlet;
/// Port identifiers.
mod port_id;
/// Closed graph ready to run.
mod runnable_graph;
/// Port handle shapes.
mod shape;
/// Work-queue entries.
mod signal;
/// Terminal consumer stages.
mod sink;
/// Producer stages.
mod source;
/// Port operations available during an activation.
mod stage_context;
/// Stage identifiers.
mod stage_id;
/// Stage activation interface.
mod stage_logic;
/// Closed set of built-in stage kinds.
mod stage_kind;
/// Per-stage lifecycle states.
mod stage_state;
/// Bounded FIFO buffer with overflow policies.
mod stream_buffer;
/// Poll-based completion handle.
mod stream_completion;
/// Marker for value-less sink results.
mod stream_done;
/// Stream error definitions.
mod stream_error;
/// Untyped stage and connection blueprint.
mod stream_graph;
/// Shared handle driving a run.
mod stream_handle;
/// Marker for absent materialized values.
mod stream_not_used;
/// Stage blueprint trait for the builder.
mod stream_stage;
/// Run-level lifecycle states.
mod stream_state;
/// Test probes for stream verification.
pub mod testing;
/// Positive-argument validation helper.
mod validate_positive_argument;

use core::any::{Any, TypeId};

pub use buffer::Buffer;
pub use completion::Completion;
pub(crate) use connection::ConnectionRuntime;
pub use drive_outcome::DriveOutcome;
pub use flow::Flow;
pub use graph_builder::GraphBuilder;
pub use graph_interpreter::GraphInterpreter;
pub use inlet::Inlet;
pub use junction::{Broadcast, Concat, Interleave, Merge, MergePreferred, Zip};
pub use keep_both::KeepBoth;
pub use keep_left::KeepLeft;
pub use keep_none::KeepNone;
pub use keep_right::KeepRight;
pub use mat_combine_rule::MatCombineRule;
pub use materialized::Materialized;
pub use materializer::StreamMaterializer;
pub use materializer_settings::MaterializerSettings;
pub use outlet::Outlet;
pub use overflow_strategy::OverflowStrategy;
pub use port_id::PortId;
pub use runnable_graph::RunnableGraph;
pub use shape::{FanInShape2, FlowShape, MergePreferredShape, SinkShape, SourceShape, UniformFanInShape, UniformFanOutShape};
pub(crate) use signal::Signal;
pub use sink::Sink;
pub use source::Source;
pub(crate) use stage_context::StageContext;
pub use stage_id::StageId;
pub(crate) use stage_logic::StageLogic;
pub use stage_kind::StageKind;
pub use stage_state::StageState;
pub use stream_buffer::StreamBuffer;
pub use stream_completion::StreamCompletion;
pub use stream_done::StreamDone;
pub use stream_error::StreamError;
pub(crate) use stream_graph::StreamGraph;
pub use stream_handle::StreamHandle;
pub use stream_not_used::StreamNotUsed;
pub use stream_stage::StreamStage;
pub use stream_state::StreamState;
pub(crate) use validate_positive_argument::validate_positive_argument;

/// Values crossing stage boundaries after type erasure.
///
/// Connections are checked with [`TypeId`]s when wired, so a failing
/// downcast past that point is a protocol bug, not a user error.
pub(crate) type DynValue = Box<dyn Any + Send + Sync + 'static>;

/// Recovers a typed element from a [`DynValue`].
///
/// # Errors
///
/// Returns `StreamError::TypeMismatch` when the value holds a different
/// type.
pub(crate) fn downcast_value<T>(value: DynValue) -> Result<T, StreamError>
where
  T: Any + Send + Sync + 'static, {
  match value.downcast::<T>() {
    | Ok(value) => Ok(*value),
    | Err(_) => Err(StreamError::TypeMismatch),
  }
}

/// Type-erased stage blueprint registered in a stream graph.
///
/// Produced by the built-in stages; user code never constructs one
/// directly.
pub struct StageDefinition {
  pub(crate) kind:         StageKind,
  pub(crate) inlets:       Vec<PortId>,
  pub(crate) inlet_types:  Vec<TypeId>,
  pub(crate) outlets:      Vec<PortId>,
  pub(crate) outlet_types: Vec<TypeId>,
  pub(crate) logic:        Box<dyn StageLogic>,
}

impl StageDefinition {
  pub(crate) fn new(
    kind: StageKind,
    inlets: Vec<PortId>,
    inlet_types: Vec<TypeId>,
    outlets: Vec<PortId>,
    outlet_types: Vec<TypeId>,
    logic: Box<dyn StageLogic>,
  ) -> Self {
    Self { kind, inlets, inlet_types, outlets, outlet_types, logic }
  }

  /// One inlet, one outlet.
  pub(crate) fn linear<In, Out>(kind: StageKind, inlet: PortId, outlet: PortId, logic: Box<dyn StageLogic>) -> Self
  where
    In: Any,
    Out: Any, {
    Self::new(kind, vec![inlet], vec![TypeId::of::<In>()], vec![outlet], vec![TypeId::of::<Out>()], logic)
  }

  /// One outlet, no inlets.
  pub(crate) fn source<Out>(kind: StageKind, outlet: PortId, logic: Box<dyn StageLogic>) -> Self
  where
    Out: Any, {
    Self::new(kind, Vec::new(), Vec::new(), vec![outlet], vec![TypeId::of::<Out>()], logic)
  }

  /// One inlet, no outlets.
  pub(crate) fn sink<In>(kind: StageKind, inlet: PortId, logic: Box<dyn StageLogic>) -> Self
  where
    In: Any, {
    Self::new(kind, vec![inlet], vec![TypeId::of::<In>()], Vec::new(), Vec::new(), logic)
  }
}
