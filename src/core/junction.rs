//! Fan-in and fan-out junction stages.

/// Duplicating fan-out.
mod broadcast;
/// Sequential fan-in.
mod concat;
/// Segment-rotating fan-in.
mod interleave;
/// Fair fan-in.
mod merge;
/// Fan-in with a preferred inlet.
mod merge_preferred;
/// Pairing fan-in.
mod zip;

pub use broadcast::Broadcast;
pub use concat::Concat;
pub use interleave::Interleave;
pub use merge::Merge;
pub use merge_preferred::MergePreferred;
pub use zip::Zip;
