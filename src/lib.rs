//! # gfa-kit: graph-algorithm utilities for sequence assembly graphs.
//!
//! This crate provides query and subsetting algorithms over an
//! already-constructed bidirected assembly graph. Segments carry sequence
//! fragments; arcs connect oriented segment endpoints; some segments are
//! placed on a named stable sequence, a linear coordinate system, with an
//! offset and a rank. Rank 0 marks the primary backbone path and higher
//! ranks mark alternative paths.
//!
//! ### Basic concepts
//!
//! A segment exists in two orientations, addressed by [`Vertex`] handles;
//! complementing a vertex flips its strand. Arcs are directed edges between
//! vertices and are queried per vertex; the reverse direction of an arc is
//! a separate arc. See [`Graph`] for construction and access.
//!
//! ### Operations
//!
//! * [`subgraph::extract`] keeps the segments within a hop radius of a set
//!   of seed segments and deletes the rest, compacting the arc arrays.
//! * [`stable::build_fragments`] reconstructs the maximal contiguous
//!   fragments of every stable sequence, cross-validating the placements
//!   and anchoring the fragment flanks onto the rank-0 backbone.
//! * [`region::parse_region`] parses a `name:start-end` region string.
//! * [`bubble::query_by_id`] and [`bubble::query_by_region`] map an
//!   interval of a stable sequence to the segments whose bubble paths
//!   cover it, given a precomputed bubble list.
//!
//! Subgraph extraction is the only operation that mutates the graph and
//! must not run concurrently with any reader. The other operations are
//! read-only and allocate fresh output owned by the caller.
//!
//! Diagnostics go through an explicit [`DiagnosticSink`] instead of any
//! process-wide verbosity state.

pub mod bubble;
pub mod gfa;
pub mod graph;
pub mod region;
pub mod stable;
pub mod subgraph;
pub mod utils;

pub use bubble::Bubble;
pub use graph::{Arc, Graph, Orientation, Segment, StableSequence, StableSlot, Vertex};
pub use region::Region;
pub use stable::{Fragment, Join};
pub use utils::DiagnosticSink;
