//! Bubble-indexed coordinate queries.
//!
//! A [`Bubble`] is a precomputed alternative-path structure spanning an
//! interval of a stable sequence; the first and last vertices of its path
//! are the stems shared with the neighboring bubbles. Given a bubble list
//! grouped by stable sequence and sorted by start coordinate, an interval
//! on a stable sequence is mapped to the ordered segment names whose paths
//! cover it. Bubble detection itself happens elsewhere; the list is taken
//! as given and is read-only here.

use crate::graph::{Graph, Vertex};
use crate::region;

use std::ops::Range;


//-----------------------------------------------------------------------------

/// A precomputed alternative-path structure over a backbone interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bubble {
    /// Stable sequence the bubble lies on.
    pub seq_id: usize,

    /// Half-open backbone interval covered by the bubble.
    pub interval: Range<usize>,

    /// Vertices on the bubble path, from the opening stem to the closing
    /// stem. Never empty.
    pub vertices: Vec<Vertex>,
}

//-----------------------------------------------------------------------------

/// Returns the ordered names of the segments whose paths cover the given
/// interval of a stable sequence.
///
/// The bubble list must be grouped by stable sequence, each group sorted by
/// ascending start coordinate. Returns [`None`] if the stable sequence has
/// no bubbles at all. An interval beyond the last bubble maps to the last
/// stem segment if it starts within that segment, and to an empty list
/// otherwise. An interval confined to a single stem maps to that stem
/// segment alone. Any other interval maps to the concatenated paths of the
/// bubbles it touches, with the first vertex of every bubble after the
/// first one skipped, as it repeats the stem shared with the previous
/// bubble.
pub fn query_by_id(
    graph: &Graph,
    bubbles: &[Bubble],
    seq_id: usize,
    interval: Range<usize>,
) -> Option<Vec<String>> {
    let (start, end) = (interval.start, interval.end);

    // One scan over the list. For both endpoints, record whether the
    // coordinate lies on the stem before a bubble or inside it.
    let mut last = 0;
    let mut start_hit: Option<(usize, bool)> = None;
    let mut end_hit: Option<(usize, bool)> = None;
    let mut last_match: Option<usize> = None;
    for (i, bubble) in bubbles.iter().enumerate() {
        if i == 0 || bubble.seq_id != bubbles[i - 1].seq_id {
            last = 0;
        }
        if bubble.seq_id != seq_id {
            continue;
        }
        last_match = Some(i);
        if last <= start && start < bubble.interval.start {
            start_hit = Some((i, true));
        } else if bubble.interval.start <= start && start < bubble.interval.end {
            start_hit = Some((i, false));
        }
        if last < end && end <= bubble.interval.start {
            end_hit = Some((i, true));
        } else if bubble.interval.start < end && end <= bubble.interval.end {
            end_hit = Some((i, false));
        }
        last = bubble.interval.end;
    }
    let last_match = last_match?;

    match start_hit {
        None => {
            // The interval lies past the last bubble, on its closing stem.
            let vertex = *bubbles[last_match].vertices.last().unwrap();
            let segment = graph.segment(vertex.segment());
            let mut result = Vec::new();
            if let Some(slot) = segment.stable {
                if start < slot.offset + segment.len {
                    result.push(segment.name.clone());
                }
            }
            Some(result)
        }
        Some((start_index, start_on_stem)) => {
            if start_on_stem && end_hit == Some((start_index, true)) {
                // Both endpoints on the same stem segment.
                let vertex = bubbles[start_index].vertices[0];
                Some(vec![graph.segment(vertex.segment()).name.clone()])
            } else {
                let end_index = match end_hit {
                    Some((i, _)) => i,
                    None => last_match,
                };
                let mut result = Vec::new();
                for (i, bubble) in bubbles.iter().enumerate().take(end_index + 1).skip(start_index) {
                    let shared_stem = if i == start_index { 0 } else { 1 };
                    for vertex in bubble.vertices.iter().skip(shared_stem) {
                        result.push(graph.segment(vertex.segment()).name.clone());
                    }
                }
                Some(result)
            }
        }
    }
}

/// Returns the segments covering the interval given as a region string.
///
/// Composes [`region::parse_region`] with stable-sequence name resolution
/// and delegates to [`query_by_id`]. Returns [`None`] if the name does not
/// resolve to a stable sequence.
pub fn query_by_region(graph: &Graph, bubbles: &[Bubble], text: &str) -> Option<Vec<String>> {
    let parsed = region::parse_region(text);
    let seq_id = graph.stable_by_name(parsed.name)?;
    query_by_id(graph, bubbles, seq_id, parsed.interval)
}

//-----------------------------------------------------------------------------
