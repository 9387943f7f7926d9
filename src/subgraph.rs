//! Bounded-radius subgraph extraction.
//!
//! This module restricts a graph to the segments reachable within a given
//! number of hops from a set of seed segments. Both orientations of every
//! seed are used as starting points, and the complement of each neighbor is
//! followed as well, so the reverse-complement side of the traversal is
//! never lost. Segments outside the radius are marked as deleted and their
//! arcs are removed.

use crate::graph::{Graph, Orientation, Vertex};

use std::collections::VecDeque;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

// A pending traversal state: an oriented vertex and its hop distance from
// the nearest seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueueEntry {
    vertex: Vertex,
    distance: usize,
}

/// Restricts the graph to the segments within `step` hops of the seeds.
///
/// Every segment reachable within `step` hops from any seed, through either
/// orientation, is kept; all other segments are marked as deleted and the
/// arc arrays are compacted. Seed names that do not resolve to a segment
/// are silently ignored. With an empty seed slice the graph is left
/// untouched; note that a non-empty slice of unresolvable names is not a
/// no-op, as every segment then ends up deleted.
///
/// With `step = 0` exactly the resolved seed segments are kept.
///
/// The graph must not be accessed concurrently during extraction:
/// compaction invalidates previously obtained adjacency slices.
///
/// Runs in O(V + E) time.
///
/// # Examples
///
/// ```
/// use gfa_kit::{Graph, Orientation, Segment, Vertex};
/// use gfa_kit::subgraph;
///
/// let mut graph = Graph::new();
/// let a = graph.add_segment(Segment::new("a", 4));
/// let b = graph.add_segment(Segment::new("b", 2));
/// let _ = graph.add_segment(Segment::new("c", 3));
/// graph.add_link(Vertex::new(a, Orientation::Forward), Vertex::new(b, Orientation::Forward), None);
///
/// subgraph::extract(&mut graph, &["a"], 1);
/// assert!(!graph.segment(a).is_deleted());
/// assert!(!graph.segment(b).is_deleted());
/// assert!(graph.segment(graph.segment_by_name("c").unwrap()).is_deleted());
/// ```
pub fn extract<S: AsRef<str>>(graph: &mut Graph, seeds: &[S], step: usize) {
    if seeds.is_empty() {
        return;
    }

    let mut queue: VecDeque<QueueEntry> = VecDeque::new();
    for name in seeds.iter() {
        if let Some(id) = graph.segment_by_name(name.as_ref()) {
            queue.push_back(QueueEntry { vertex: Vertex::new(id, Orientation::Forward), distance: 0 });
            queue.push_back(QueueEntry { vertex: Vertex::new(id, Orientation::Reverse), distance: 0 });
        }
    }

    // Everything starts out deleted; the traversal rescues what it reaches.
    graph.mark_all_deleted();
    let mut visited = vec![false; 2 * graph.segment_count()];
    while let Some(entry) = queue.pop_front() {
        if visited[entry.vertex.id()] {
            continue;
        }
        visited[entry.vertex.id()] = true;
        graph.set_deleted(entry.vertex.segment(), false);
        if entry.distance < step {
            for arc in graph.arcs_from(entry.vertex) {
                if !visited[arc.to.id()] {
                    queue.push_back(QueueEntry { vertex: arc.to, distance: entry.distance + 1 });
                }
                let complement = arc.to.flip();
                if !visited[complement.id()] {
                    queue.push_back(QueueEntry { vertex: complement, distance: entry.distance + 1 });
                }
            }
        }
    }

    graph.compact_arcs();
}

//-----------------------------------------------------------------------------
