//! Test probes for stream verification.
//!
//! Probes keep their state behind a shared lock so tests hold one end while
//! the interpreter holds the other; tests drive the run explicitly through
//! a [`StreamHandle`](super::StreamHandle) between interactions.

/// Events observed by a sink probe.
mod probe_event;
/// Demand-controlled observing sink.
mod test_sink_probe;
/// Externally fed source.
mod test_source_probe;

pub use probe_event::ProbeEvent;
pub use test_sink_probe::TestSinkProbe;
pub use test_source_probe::TestSourceProbe;

use super::{PortId, Sink, Source, StageDefinition, StageKind};

/// Creates a source whose elements, completion and failure are injected by
/// the returned [`TestSourceProbe`].
#[must_use]
pub fn source_probe<T>() -> Source<T, TestSourceProbe<T>>
where
  T: Send + Sync + 'static, {
  let (probe, logic) = TestSourceProbe::create();
  let outlet = PortId::next();
  Source::from_definition(StageDefinition::source::<T>(StageKind::SourceProbe, outlet, logic), outlet, probe)
}

/// Creates a sink that only pulls on explicit [`TestSinkProbe::request`]
/// calls and records everything it sees.
#[must_use]
pub fn sink_probe<T>() -> Sink<T, TestSinkProbe<T>>
where
  T: Send + Sync + 'static, {
  let (probe, logic) = TestSinkProbe::create();
  Sink::from_parts(StageKind::SinkProbe, logic, probe)
}
