//! Data model for a bidirected sequence-assembly graph.
//!
//! A [`Graph`] stores [`Segment`]s carrying sequence fragments and [`Arc`]s
//! connecting oriented segment endpoints. Each segment exists in two
//! orientations, addressed by [`Vertex`] handles. Segments may be placed on
//! a named [`StableSequence`], a linear coordinate system, and may carry a
//! rank identifying which alternative path they belong to (rank 0 is the
//! primary backbone).
//!
//! The graph is built programmatically with [`Graph::add_segment`] and
//! [`Graph::add_link`]. Subgraph extraction marks segments as deleted and
//! then compacts the adjacency arrays with [`Graph::compact_arcs`]; all
//! other operations in this crate are read-only.

use std::collections::HashMap;
use std::fmt::Display;


//-----------------------------------------------------------------------------

/// Orientation of a segment: forward or reverse complement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    /// The segment as stored.
    Forward,

    /// The reverse complement of the segment.
    Reverse,
}

impl Orientation {
    /// Returns the opposite orientation.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Orientation::Forward => write!(f, "+"),
            Orientation::Reverse => write!(f, "-"),
        }
    }
}

//-----------------------------------------------------------------------------

/// An oriented vertex: a segment in one of its two orientations.
///
/// Vertices are encoded as segment id × 2 + strand bit, so the two
/// orientations of a segment are adjacent identifiers and complementing a
/// vertex flips the low bit.
///
/// # Examples
///
/// ```
/// use gfa_kit::{Orientation, Vertex};
///
/// let v = Vertex::new(3, Orientation::Forward);
/// assert_eq!(v.id(), 6);
/// assert_eq!(v.segment(), 3);
/// assert_eq!(v.flip(), Vertex::new(3, Orientation::Reverse));
/// assert_eq!(v.flip().flip(), v);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex(usize);

impl Vertex {
    /// Creates a vertex for the given segment in the given orientation.
    #[inline]
    pub fn new(segment: usize, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Forward => Vertex(segment * 2),
            Orientation::Reverse => Vertex(segment * 2 + 1),
        }
    }

    /// Creates a vertex from its encoded identifier.
    #[inline]
    pub fn from_id(id: usize) -> Self {
        Vertex(id)
    }

    /// Returns the encoded identifier of the vertex.
    #[inline]
    pub fn id(self) -> usize {
        self.0
    }

    /// Returns the identifier of the underlying segment.
    #[inline]
    pub fn segment(self) -> usize {
        self.0 / 2
    }

    /// Returns the orientation of the vertex.
    #[inline]
    pub fn orientation(self) -> Orientation {
        if self.0 % 2 == 0 { Orientation::Forward } else { Orientation::Reverse }
    }

    /// Returns the complement of the vertex: the same segment in the
    /// opposite orientation.
    #[inline]
    pub fn flip(self) -> Self {
        Vertex(self.0 ^ 1)
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.orientation() {
            Orientation::Forward => write!(f, ">{}", self.segment()),
            Orientation::Reverse => write!(f, "<{}", self.segment()),
        }
    }
}

//-----------------------------------------------------------------------------

/// Placement of a segment on a stable sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StableSlot {
    /// Identifier of the stable sequence.
    pub seq_id: usize,

    /// Start offset of the segment on the stable sequence.
    pub offset: usize,
}

/// A graph node carrying a sequence fragment.
///
/// The sequence itself is optional; only its length is required. A segment
/// may be placed on a stable sequence and may carry a rank. Rank 0 marks the
/// primary backbone path; an absent rank means the segment belongs to no
/// particular path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Unique name of the segment.
    pub name: String,

    /// Length of the segment in bp.
    pub len: usize,

    /// The sequence, if it is stored.
    pub sequence: Option<Vec<u8>>,

    /// Placement on a stable sequence, if any.
    pub stable: Option<StableSlot>,

    /// Rank of the path the segment belongs to, if any.
    pub rank: Option<usize>,

    deleted: bool,
}

impl Segment {
    /// Creates a segment of the given length without a stored sequence.
    pub fn new(name: &str, len: usize) -> Self {
        Segment {
            name: name.to_string(),
            len,
            sequence: None,
            stable: None,
            rank: None,
            deleted: false,
        }
    }

    /// Creates a segment that stores the given sequence.
    pub fn with_sequence(name: &str, sequence: Vec<u8>) -> Self {
        Segment {
            name: name.to_string(),
            len: sequence.len(),
            sequence: Some(sequence),
            stable: None,
            rank: None,
            deleted: false,
        }
    }

    /// Places the segment at the given offset on a stable sequence.
    pub fn placed(mut self, seq_id: usize, offset: usize) -> Self {
        self.stable = Some(StableSlot { seq_id, offset });
        self
    }

    /// Assigns the segment to the path with the given rank.
    pub fn ranked(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Returns `true` if the segment is marked as deleted.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// A directed edge from one oriented vertex to another.
///
/// Arcs are stored per source vertex. The reverse direction is a separate
/// arc and is not implicitly present; [`Graph::add_link`] adds both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arc {
    /// Target vertex.
    pub to: Vertex,

    /// Rank of the path the arc belongs to, if any.
    pub rank: Option<usize>,
}

/// A named linear coordinate system segments may be placed on.
///
/// Membership is implicit: a segment belongs to the stable sequence named by
/// its [`StableSlot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StableSequence {
    /// Name of the stable sequence.
    pub name: String,
}

//-----------------------------------------------------------------------------

/// A bidirected sequence-assembly graph.
///
/// # Examples
///
/// ```
/// use gfa_kit::{Graph, Orientation, Segment, Vertex};
///
/// let mut graph = Graph::new();
/// let chr = graph.add_stable_sequence("chr1");
/// let a = graph.add_segment(Segment::with_sequence("a", b"ACGT".to_vec()).placed(chr, 0).ranked(0));
/// let b = graph.add_segment(Segment::with_sequence("b", b"TT".to_vec()).placed(chr, 4).ranked(0));
/// graph.add_link(Vertex::new(a, Orientation::Forward), Vertex::new(b, Orientation::Forward), Some(0));
///
/// assert_eq!(graph.segment_count(), 2);
/// assert_eq!(graph.segment_by_name("b"), Some(b));
/// assert_eq!(graph.arcs_from(Vertex::new(a, Orientation::Forward)).len(), 1);
/// // The complement arc was added as well.
/// assert_eq!(graph.arcs_from(Vertex::new(b, Orientation::Reverse)).len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    segments: Vec<Segment>,
    stable: Vec<StableSequence>,
    arcs: Vec<Vec<Arc>>,
    segment_names: HashMap<String, usize>,
    stable_names: HashMap<String, usize>,
}

/// Construction.
impl Graph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Graph::default()
    }

    /// Adds a segment to the graph and returns its identifier.
    ///
    /// # Panics
    ///
    /// Panics if the graph already contains a segment with the same name.
    pub fn add_segment(&mut self, segment: Segment) -> usize {
        let id = self.segments.len();
        let previous = self.segment_names.insert(segment.name.clone(), id);
        if previous.is_some() {
            panic!("Duplicate segment name {}", segment.name);
        }
        self.segments.push(segment);
        self.arcs.push(Vec::new());
        self.arcs.push(Vec::new());
        id
    }

    /// Returns the identifier of the stable sequence with the given name,
    /// inserting it first if necessary.
    pub fn add_stable_sequence(&mut self, name: &str) -> usize {
        if let Some(id) = self.stable_names.get(name) {
            return *id;
        }
        let id = self.stable.len();
        self.stable.push(StableSequence { name: name.to_string() });
        self.stable_names.insert(name.to_string(), id);
        id
    }

    /// Adds a single directed arc from `from` to `to`.
    pub fn add_arc(&mut self, from: Vertex, to: Vertex, rank: Option<usize>) {
        self.arcs[from.id()].push(Arc { to, rank });
    }

    /// Adds the arc from `from` to `to` together with its complement arc
    /// from `to.flip()` to `from.flip()`, as a link in the exchange format
    /// implies both directions.
    pub fn add_link(&mut self, from: Vertex, to: Vertex, rank: Option<usize>) {
        self.add_arc(from, to, rank);
        self.add_arc(to.flip(), from.flip(), rank);
    }
}

/// Access.
impl Graph {
    /// Returns the number of segments, including deleted ones.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the number of stable sequences.
    #[inline]
    pub fn stable_count(&self) -> usize {
        self.stable.len()
    }

    /// Returns the segment with the given identifier.
    #[inline]
    pub fn segment(&self, id: usize) -> &Segment {
        &self.segments[id]
    }

    /// Returns the identifier of the segment with the given name, or
    /// [`None`] if there is no such segment.
    pub fn segment_by_name(&self, name: &str) -> Option<usize> {
        self.segment_names.get(name).copied()
    }

    /// Returns the stable sequence with the given identifier.
    #[inline]
    pub fn stable_sequence(&self, id: usize) -> &StableSequence {
        &self.stable[id]
    }

    /// Returns the identifier of the stable sequence with the given name,
    /// or [`None`] if there is no such stable sequence.
    pub fn stable_by_name(&self, name: &str) -> Option<usize> {
        self.stable_names.get(name).copied()
    }

    /// Returns an iterator over all segments with their identifiers,
    /// including deleted ones.
    pub fn segments(&self) -> impl Iterator<Item = (usize, &Segment)> {
        self.segments.iter().enumerate()
    }

    /// Returns the arcs leaving the given vertex.
    #[inline]
    pub fn arcs_from(&self, v: Vertex) -> &[Arc] {
        &self.arcs[v.id()]
    }

    /// Returns `true` if there is an arc from `from` to `to`.
    pub fn has_arc(&self, from: Vertex, to: Vertex) -> bool {
        self.arcs_from(from).iter().any(|arc| arc.to == to)
    }

    /// Returns the total number of arcs.
    pub fn arc_count(&self) -> usize {
        self.arcs.iter().map(|list| list.len()).sum()
    }
}

/// Deletion and compaction.
impl Graph {
    /// Sets the deletion flag of the given segment.
    pub fn set_deleted(&mut self, id: usize, deleted: bool) {
        self.segments[id].deleted = deleted;
    }

    /// Marks every segment as deleted.
    pub fn mark_all_deleted(&mut self) {
        for segment in self.segments.iter_mut() {
            segment.deleted = true;
        }
    }

    /// Removes all arcs that touch a deleted segment and rebuilds the
    /// adjacency arrays.
    ///
    /// Adjacency slices obtained before compaction are invalidated by this.
    pub fn compact_arcs(&mut self) {
        for id in 0..self.arcs.len() {
            let vertex = Vertex::from_id(id);
            if self.segments[vertex.segment()].deleted {
                self.arcs[id] = Vec::new();
                continue;
            }
            let segments = &self.segments;
            self.arcs[id].retain(|arc| !segments[arc.to.segment()].deleted);
        }
    }
}

//-----------------------------------------------------------------------------
