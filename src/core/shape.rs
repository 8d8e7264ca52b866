//! Port handle shapes returned by the graph builder.

/// Two-input fan-in shape with independent element types.
mod fan_in_shape2;
/// One free inlet, one free outlet.
mod flow_shape;
/// Fan-in shape with a preferred inlet.
mod merge_preferred_shape;
/// One free inlet.
mod sink_shape;
/// One free outlet.
mod source_shape;
/// Uniform n-input fan-in shape.
mod uniform_fan_in_shape;
/// Uniform n-output fan-out shape.
mod uniform_fan_out_shape;

pub use fan_in_shape2::FanInShape2;
pub use flow_shape::FlowShape;
pub use merge_preferred_shape::MergePreferredShape;
pub use sink_shape::SinkShape;
pub use source_shape::SourceShape;
pub use uniform_fan_in_shape::UniformFanInShape;
pub use uniform_fan_out_shape::UniformFanOutShape;
