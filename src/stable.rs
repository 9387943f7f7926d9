//! Reconstruction of maximal contiguous stable-sequence fragments.
//!
//! Segments placed on a stable sequence carry an offset and a rank. This
//! module buckets the members of each stable sequence, sorts them by offset,
//! validates that the placements are consistent, and reconstructs the
//! maximal runs of offset-contiguous, arc-connected segments as
//! [`Fragment`]s. The flanks of each fragment are anchored onto the rank-0
//! backbone with [`find_join`].

use crate::graph::{Graph, Orientation, Vertex};
use crate::utils::DiagnosticSink;


//-----------------------------------------------------------------------------

/// A backbone anchor for one flank of a [`Fragment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Join {
    /// Stable sequence the flank is anchored on.
    pub seq_id: usize,

    /// Coordinate on that stable sequence.
    pub position: usize,

    /// Orientation of the join target.
    pub orientation: Orientation,
}

impl Join {
    // The start-side join stores the flipped orientation of its target.
    fn flip(self) -> Self {
        Join { orientation: self.orientation.flip(), ..self }
    }
}

/// A maximal run of offset-contiguous, arc-connected segments on one stable
/// sequence.
///
/// Fragments are freshly allocated on every call and owned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Stable sequence the fragment lies on.
    pub seq_id: usize,

    /// Start offset of the fragment on the stable sequence.
    pub offset: usize,

    /// Rank shared by the member segments.
    pub rank: Option<usize>,

    /// Total length of the member segments in bp.
    pub len: usize,

    /// Concatenated member sequences, if materialization was requested.
    pub sequence: Option<Vec<u8>>,

    /// Anchor for the start flank, if one was found.
    pub start_join: Option<Join>,

    /// Anchor for the end flank, if one was found.
    pub end_join: Option<Join>,
}

//-----------------------------------------------------------------------------

/// Builds the maximal contiguous fragments of every stable sequence.
///
/// The members of each stable sequence are sorted by offset and validated
/// first: overlapping placements, gaps or missing connecting arcs on the
/// rank-0 backbone, and rank mixtures within one stable sequence are all
/// structural inconsistencies. Any inconsistency reports at level 2 and
/// aborts fragment output for the whole call, across all stable sequences,
/// so an empty result may mean either an unannotated graph or a rejected
/// one.
///
/// A fragment extends across two consecutive members only when their
/// offsets are exactly adjacent and a literal connecting arc exists;
/// otherwise the fragment is closed and a new one opened. For rank>0
/// members a missing arc between adjacent offsets is not an error.
///
/// With `materialize` set, each fragment carries the concatenation of its
/// member sequences in scan order.
///
/// The returned fragments are fresh and owned by the caller.
pub fn build_fragments(graph: &Graph, materialize: bool, sink: &mut DiagnosticSink) -> Vec<Fragment> {
    if graph.stable_count() == 0 {
        return Vec::new();
    }

    let (entries, bounds) = sorted_members(graph);
    if !validate(graph, &entries, &bounds, sink) {
        return Vec::new();
    }

    let mut fragments = Vec::new();
    for seq_id in 0..graph.stable_count() {
        let bucket = &entries[bounds[seq_id]..bounds[seq_id + 1]];
        if bucket.is_empty() {
            continue;
        }
        let mut start = 0;
        for j in 1..=bucket.len() {
            if j < bucket.len() && extends(graph, bucket[j - 1], bucket[j]) {
                continue;
            }
            fragments.push(close_fragment(graph, seq_id, &bucket[start..j], materialize, sink));
            start = j;
        }
    }
    fragments
}

/// Finds the backbone anchor for the given oriented vertex.
///
/// Returns [`None`] when the owning segment has rank 0: the backbone does
/// not join anywhere. Otherwise the outgoing arcs of `v` are scanned,
/// counting the continuations of the segment's own path and the arcs
/// leading to a strictly lower-rank segment independently. A unique
/// same-rank continuation is preferred; failing that, a unique lower-rank
/// target is used; with neither, the join is ambiguous and the result is
/// [`None`] with a level-3 note. An ambiguous join is never an error.
///
/// The join coordinate is the start offset of the target segment for a
/// forward target, or start + length for a reverse target.
pub fn find_join(graph: &Graph, v: Vertex, sink: &mut DiagnosticSink) -> Option<Join> {
    let segment = graph.segment(v.segment());
    if segment.rank == Some(0) {
        return None;
    }

    let mut same_rank = 0;
    let mut same_target = None;
    let mut lower_rank = 0;
    let mut lower_target = None;
    for arc in graph.arcs_from(v) {
        if arc.rank.is_some() && arc.rank == segment.rank {
            same_rank += 1;
            same_target = Some(arc.to);
        } else if let (Some(own), Some(target)) = (segment.rank, graph.segment(arc.to.segment()).rank) {
            if target < own {
                lower_rank += 1;
                lower_target = Some(arc.to);
            }
        }
    }

    let w = if same_rank == 1 {
        same_target.unwrap()
    } else if lower_rank == 1 {
        lower_target.unwrap()
    } else {
        sink.report(3, format!(
            "no unique join arc for vertex {}{}: {} same-rank, {} lower-rank",
            if v.orientation() == Orientation::Reverse { '<' } else { '>' },
            segment.name, same_rank, lower_rank
        ));
        return None;
    };

    let target = graph.segment(w.segment());
    let slot = target.stable?;
    let position = match w.orientation() {
        Orientation::Forward => slot.offset,
        Orientation::Reverse => slot.offset + target.len,
    };
    Some(Join { seq_id: slot.seq_id, position, orientation: w.orientation() })
}

//-----------------------------------------------------------------------------

// Members of every stable sequence as (offset, segment id) pairs, bucketed
// by stable sequence. Bucket `i` is `entries[bounds[i]..bounds[i + 1]]`,
// sorted by (offset, segment id).
fn sorted_members(graph: &Graph) -> (Vec<(usize, usize)>, Vec<usize>) {
    let mut counts = vec![0; graph.stable_count()];
    for (_, segment) in graph.segments() {
        if let Some(slot) = segment.stable {
            counts[slot.seq_id] += 1;
        }
    }
    let mut bounds = vec![0; graph.stable_count() + 1];
    for i in 0..graph.stable_count() {
        bounds[i + 1] = bounds[i] + counts[i];
    }

    let mut entries = vec![(0, 0); bounds[graph.stable_count()]];
    let mut filled = vec![0; graph.stable_count()];
    for (id, segment) in graph.segments() {
        if let Some(slot) = segment.stable {
            entries[bounds[slot.seq_id] + filled[slot.seq_id]] = (slot.offset, id);
            filled[slot.seq_id] += 1;
        }
    }
    for i in 0..graph.stable_count() {
        radix_sort_by_offset(&mut entries[bounds[i]..bounds[i + 1]]);
    }
    (entries, bounds)
}

// Stable LSD radix sort by the first element of each pair, one byte at a
// time. Linear in the number of entries; insertion order breaks ties.
fn radix_sort_by_offset(entries: &mut [(usize, usize)]) {
    if entries.len() < 2 {
        return;
    }
    let max_key = entries.iter().map(|entry| entry.0).max().unwrap();
    let mut scratch = entries.to_vec();
    let mut shift = 0;
    loop {
        let mut counts = [0; 256];
        for entry in entries.iter() {
            counts[(entry.0 >> shift) & 0xFF] += 1;
        }
        let mut offsets = [0; 256];
        let mut total = 0;
        for (offset, count) in offsets.iter_mut().zip(counts.iter()) {
            *offset = total;
            total += count;
        }
        for entry in entries.iter() {
            let digit = (entry.0 >> shift) & 0xFF;
            scratch[offsets[digit]] = *entry;
            offsets[digit] += 1;
        }
        entries.copy_from_slice(&scratch);
        shift += 8;
        if shift >= usize::BITS as usize || (max_key >> shift) == 0 {
            break;
        }
    }
}

// Checks the consistency of the sorted members of every stable sequence.
// Any failure reports at level 2 and rejects the whole call.
fn validate(graph: &Graph, entries: &[(usize, usize)], bounds: &[usize], sink: &mut DiagnosticSink) -> bool {
    for seq_id in 0..graph.stable_count() {
        let bucket = &entries[bounds[seq_id]..bounds[seq_id + 1]];
        if bucket.is_empty() {
            continue;
        }
        let name = &graph.stable_sequence(seq_id).name;
        let first = graph.segment(bucket[0].1);
        if first.rank == Some(0) && bucket[0].0 != 0 {
            sink.report(2, format!("rank-0 stable sequence \"{}\" does not start at offset 0", name));
            return false;
        }
        for pair in bucket.windows(2) {
            let (left_offset, left_id) = pair[0];
            let (right_offset, right_id) = pair[1];
            let left = graph.segment(left_id);
            let right = graph.segment(right_id);
            let left_end = left_offset + left.len;
            if left_end > right_offset {
                sink.report(2, format!("segments overlap on stable sequence \"{}\"", name));
                return false;
            }
            if left.rank == Some(0) && left_end != right_offset {
                sink.report(2, format!("rank-0 stable sequence \"{}\" is not contiguous", name));
                return false;
            }
            if left.rank != right.rank {
                sink.report(2, format!("stable sequence \"{}\" mixes segments of different ranks", name));
                return false;
            }
            if left_end == right_offset {
                let connected = graph.has_arc(
                    Vertex::new(left_id, Orientation::Forward),
                    Vertex::new(right_id, Orientation::Forward),
                );
                if left.rank == Some(0) && !connected {
                    sink.report(2, format!(
                        "adjacent segments on rank-0 stable sequence \"{}\" are not connected", name
                    ));
                    return false;
                }
            }
        }
    }
    true
}

// A fragment extends across a pair of members only when the offsets are
// exactly adjacent and a literal connecting arc exists.
fn extends(graph: &Graph, left: (usize, usize), right: (usize, usize)) -> bool {
    let (left_offset, left_id) = left;
    let (right_offset, right_id) = right;
    left_offset + graph.segment(left_id).len == right_offset
        && graph.has_arc(Vertex::new(left_id, Orientation::Forward), Vertex::new(right_id, Orientation::Forward))
}

// Closes a fragment over the given members. The start flank joins through
// the reversed first vertex and the end flank through the forward last
// vertex.
fn close_fragment(
    graph: &Graph,
    seq_id: usize,
    members: &[(usize, usize)],
    materialize: bool,
    sink: &mut DiagnosticSink,
) -> Fragment {
    let (offset, first_id) = members[0];
    let last_id = members[members.len() - 1].1;
    let len = members.iter().map(|&(_, id)| graph.segment(id).len).sum();

    let sequence = if materialize {
        let mut result = Vec::with_capacity(len);
        for &(_, id) in members.iter() {
            if let Some(seq) = &graph.segment(id).sequence {
                result.extend_from_slice(seq);
            }
        }
        Some(result)
    } else {
        None
    };

    let start_join = find_join(graph, Vertex::new(first_id, Orientation::Reverse), sink).map(Join::flip);
    let end_join = find_join(graph, Vertex::new(last_id, Orientation::Forward), sink);

    Fragment {
        seq_id,
        offset,
        rank: graph.segment(first_id).rank,
        len,
        sequence,
        start_join,
        end_join,
    }
}

//-----------------------------------------------------------------------------
