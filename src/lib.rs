//! Demand-driven dataflow graphs.
//!
//! Streams of values flow through a topology of stages connected by typed
//! ports under a pull-based backpressure protocol. Topologies may contain
//! cycles: a [`core::Flow`] with one free inlet and one free outlet can be
//! closed on itself with [`core::Flow::join`], and the interpreter drives the
//! resulting loop to completion as long as the cycle carries slack (every
//! connection has a bounded input buffer, and an explicit [`core::Buffer`]
//! stage can add more).

pub mod core;
