//! Reading and writing graphs in the GFA interchange format.
//!
//! The reader covers what the command-line tools need: `S` lines with
//! optional `LN:i`, `SN:Z`, `SO:i`, and `SR:i` tags, and `L` lines with an
//! optional `SR:i` tag. Every link adds the arc and its complement. All
//! other record types are skipped, and no semantic validation of the graph
//! is performed.

use crate::graph::{Graph, Orientation, Segment, Vertex};

use std::io::{self, BufRead, Write};

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// Reads a graph from GFA input.
///
/// Links may refer to segments defined later in the input; they are applied
/// once all segments are known.
///
/// # Errors
///
/// Returns an error with the line number for unreadable input, malformed
/// `S`/`L` lines, duplicate segment names, and links referring to unknown
/// segments.
pub fn read_gfa<T: BufRead + ?Sized>(input: &mut T) -> Result<Graph, String> {
    let mut graph = Graph::new();
    let mut links: Vec<LinkRecord> = Vec::new();

    let mut line_num = 0;
    for line in input.lines() {
        line_num += 1;
        let line = line.map_err(|x| format!("line {}: {}", line_num, x))?;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        match fields[0] {
            "S" => parse_segment(&mut graph, &fields).map_err(|x| format!("line {}: {}", line_num, x))?,
            "L" => links.push(parse_link(&fields).map_err(|x| format!("line {}: {}", line_num, x))?),
            _ => (),
        }
    }

    for link in links.iter() {
        let from = graph.segment_by_name(&link.from).ok_or(
            format!("link refers to unknown segment {}", link.from)
        )?;
        let to = graph.segment_by_name(&link.to).ok_or(
            format!("link refers to unknown segment {}", link.to)
        )?;
        graph.add_link(
            Vertex::new(from, link.from_orientation),
            Vertex::new(to, link.to_orientation),
            link.rank,
        );
    }

    Ok(graph)
}

/// Writes the graph as GFA.
///
/// Deleted segments and their arcs are skipped, so a subsetted graph writes
/// out cleanly. Each complement pair of arcs produces a single link line in
/// its canonical direction.
pub fn write_gfa<T: Write>(graph: &Graph, output: &mut T) -> io::Result<()> {
    output.write_all(b"H\tVN:Z:1.0\n")?;

    for (_, segment) in graph.segments() {
        if segment.is_deleted() {
            continue;
        }
        write_segment(segment, graph, output)?;
    }

    for (id, segment) in graph.segments() {
        if segment.is_deleted() {
            continue;
        }
        for orientation in [Orientation::Forward, Orientation::Reverse] {
            let from = Vertex::new(id, orientation);
            for arc in graph.arcs_from(from) {
                if !graph.segment(arc.to.segment()).is_deleted() && link_is_canonical(from, arc.to) {
                    write_link(graph, from, arc.to, arc.rank, output)?;
                }
            }
        }
    }

    Ok(())
}

//-----------------------------------------------------------------------------

struct LinkRecord {
    from: String,
    from_orientation: Orientation,
    to: String,
    to_orientation: Orientation,
    rank: Option<usize>,
}

fn parse_orientation(field: &str) -> Result<Orientation, String> {
    match field {
        "+" => Ok(Orientation::Forward),
        "-" => Ok(Orientation::Reverse),
        _ => Err(format!("invalid orientation {}", field)),
    }
}

// A non-negative SR:i value is a rank; a negative one means no rank.
fn parse_rank(value: &str) -> Result<Option<usize>, String> {
    let rank = value.parse::<i64>().map_err(|_| format!("invalid rank {}", value))?;
    if rank < 0 {
        Ok(None)
    } else {
        Ok(Some(rank as usize))
    }
}

fn parse_segment(graph: &mut Graph, fields: &[&str]) -> Result<(), String> {
    if fields.len() < 3 {
        return Err(String::from("segment line with fewer than 3 fields"));
    }
    let name = fields[1];
    if graph.segment_by_name(name).is_some() {
        return Err(format!("duplicate segment {}", name));
    }

    let sequence = if fields[2] == "*" { None } else { Some(fields[2].as_bytes().to_vec()) };
    let mut len = sequence.as_ref().map_or(0, |seq| seq.len());
    let mut stable_name: Option<&str> = None;
    let mut stable_offset: Option<usize> = None;
    let mut rank: Option<usize> = None;
    for field in fields[3..].iter() {
        if let Some(value) = field.strip_prefix("LN:i:") {
            if sequence.is_none() {
                len = value.parse().map_err(|_| format!("invalid length {}", value))?;
            }
        } else if let Some(value) = field.strip_prefix("SN:Z:") {
            stable_name = Some(value);
        } else if let Some(value) = field.strip_prefix("SO:i:") {
            stable_offset = Some(value.parse().map_err(|_| format!("invalid offset {}", value))?);
        } else if let Some(value) = field.strip_prefix("SR:i:") {
            rank = parse_rank(value)?;
        }
    }

    let mut segment = match sequence {
        Some(seq) => Segment::with_sequence(name, seq),
        None => Segment::new(name, len),
    };
    if let (Some(stable_name), Some(offset)) = (stable_name, stable_offset) {
        let seq_id = graph.add_stable_sequence(stable_name);
        segment = segment.placed(seq_id, offset);
    }
    if let Some(rank) = rank {
        segment = segment.ranked(rank);
    }
    graph.add_segment(segment);
    Ok(())
}

fn parse_link(fields: &[&str]) -> Result<LinkRecord, String> {
    if fields.len() < 5 {
        return Err(String::from("link line with fewer than 5 fields"));
    }
    let mut rank = None;
    for field in fields[5..].iter() {
        if let Some(value) = field.strip_prefix("SR:i:") {
            rank = parse_rank(value)?;
        }
    }
    Ok(LinkRecord {
        from: fields[1].to_string(),
        from_orientation: parse_orientation(fields[2])?,
        to: fields[3].to_string(),
        to_orientation: parse_orientation(fields[4])?,
        rank,
    })
}

//-----------------------------------------------------------------------------

fn write_segment<T: Write>(segment: &Segment, graph: &Graph, output: &mut T) -> io::Result<()> {
    output.write_all(b"S\t")?;
    output.write_all(segment.name.as_bytes())?;
    output.write_all(b"\t")?;
    match &segment.sequence {
        Some(sequence) => output.write_all(sequence)?,
        None => {
            output.write_all(b"*\tLN:i:")?;
            output.write_all(segment.len.to_string().as_bytes())?;
        }
    }
    if let Some(slot) = segment.stable {
        output.write_all(b"\tSN:Z:")?;
        output.write_all(graph.stable_sequence(slot.seq_id).name.as_bytes())?;
        output.write_all(b"\tSO:i:")?;
        output.write_all(slot.offset.to_string().as_bytes())?;
    }
    if let Some(rank) = segment.rank {
        output.write_all(b"\tSR:i:")?;
        output.write_all(rank.to_string().as_bytes())?;
    }
    output.write_all(b"\n")?;
    Ok(())
}

fn write_link<T: Write>(
    graph: &Graph,
    from: Vertex,
    to: Vertex,
    rank: Option<usize>,
    output: &mut T,
) -> io::Result<()> {
    output.write_all(b"L\t")?;
    output.write_all(graph.segment(from.segment()).name.as_bytes())?;
    match from.orientation() {
        Orientation::Forward => output.write_all(b"\t+\t")?,
        Orientation::Reverse => output.write_all(b"\t-\t")?,
    }
    output.write_all(graph.segment(to.segment()).name.as_bytes())?;
    match to.orientation() {
        Orientation::Forward => output.write_all(b"\t+\t0M")?,
        Orientation::Reverse => output.write_all(b"\t-\t0M")?,
    }
    if let Some(rank) = rank {
        output.write_all(b"\tSR:i:")?;
        output.write_all(rank.to_string().as_bytes())?;
    }
    output.write_all(b"\n")?;
    Ok(())
}

// Exactly one arc of a complement pair is written.
fn link_is_canonical(from: Vertex, to: Vertex) -> bool {
    if from.orientation() == Orientation::Forward {
        to.segment() >= from.segment()
    } else {
        (to.segment() > from.segment())
            || (to.segment() == from.segment() && to.orientation() == Orientation::Forward)
    }
}

//-----------------------------------------------------------------------------
