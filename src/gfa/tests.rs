use super::*;

use crate::utils;

use flate2::write::GzEncoder;
use flate2::Compression;

use std::fs::{self, File};
use std::{env, process};

//-----------------------------------------------------------------------------

const EXAMPLE: &str = "H\tVN:Z:1.0
S\tb0\tACGT\tSN:Z:chr\tSO:i:0\tSR:i:0
S\tb1\tTTT\tSN:Z:chr\tSO:i:4\tSR:i:0
S\ta0\t*\tLN:i:6\tSN:Z:alt\tSO:i:0\tSR:i:1
L\tb0\t+\tb1\t+\t0M\tSR:i:0
L\tb0\t+\ta0\t+\t0M\tSR:i:1
";

#[test]
fn read_segments_and_tags() {
    let mut input = EXAMPLE.as_bytes();
    let graph = read_gfa(&mut input).unwrap();

    assert_eq!(graph.segment_count(), 3, "Wrong segment count");
    assert_eq!(graph.stable_count(), 2, "Wrong stable sequence count");

    let b0 = graph.segment(graph.segment_by_name("b0").unwrap());
    assert_eq!(b0.sequence.as_deref(), Some(&b"ACGT"[..]), "Wrong sequence for b0");
    assert_eq!(b0.len, 4);
    assert_eq!(b0.rank, Some(0));
    let slot = b0.stable.unwrap();
    assert_eq!(graph.stable_sequence(slot.seq_id).name, "chr");
    assert_eq!(slot.offset, 0);

    // Sequence elided with a length tag.
    let a0 = graph.segment(graph.segment_by_name("a0").unwrap());
    assert_eq!(a0.sequence, None, "An elided sequence was stored");
    assert_eq!(a0.len, 6, "Wrong length from the LN tag");
    assert_eq!(a0.rank, Some(1));
}

#[test]
fn read_links_with_complements() {
    let mut input = EXAMPLE.as_bytes();
    let graph = read_gfa(&mut input).unwrap();
    let b0 = graph.segment_by_name("b0").unwrap();
    let b1 = graph.segment_by_name("b1").unwrap();

    let from = Vertex::new(b0, Orientation::Forward);
    let to = Vertex::new(b1, Orientation::Forward);
    assert!(graph.has_arc(from, to), "Missing link arc");
    assert!(graph.has_arc(to.flip(), from.flip()), "Missing complement arc");
    assert_eq!(graph.arcs_from(from).len(), 2, "Wrong out-degree for b0 forward");
    assert_eq!(graph.arcs_from(from)[0].rank, Some(0), "Wrong rank on the first arc");
}

#[test]
fn links_may_precede_segments() {
    let gfa = "L\tu\t+\tv\t+\t0M\nS\tu\tAC\nS\tv\tGT\n";
    let graph = read_gfa(&mut gfa.as_bytes()).unwrap();
    let u = graph.segment_by_name("u").unwrap();
    let v = graph.segment_by_name("v").unwrap();
    assert!(graph.has_arc(Vertex::new(u, Orientation::Forward), Vertex::new(v, Orientation::Forward)));
}

#[test]
fn reverse_orientations() {
    let gfa = "S\tu\tAC\nS\tv\tGT\nL\tu\t-\tv\t+\t0M\n";
    let graph = read_gfa(&mut gfa.as_bytes()).unwrap();
    let u = graph.segment_by_name("u").unwrap();
    let v = graph.segment_by_name("v").unwrap();
    assert!(graph.has_arc(Vertex::new(u, Orientation::Reverse), Vertex::new(v, Orientation::Forward)));
    assert!(graph.has_arc(Vertex::new(v, Orientation::Reverse), Vertex::new(u, Orientation::Forward)));
}

//-----------------------------------------------------------------------------

#[test]
fn malformed_input() {
    let cases = [
        ("S\tu\tAC\nS\tu\tGT\n", "duplicate"),
        ("S\tu\tAC\nL\tu\t+\tv\t+\t0M\n", "unknown segment"),
        ("S\tu\tAC\nS\tv\tGT\nL\tu\t?\tv\t+\t0M\n", "orientation"),
        ("S\tu\n", "fewer than 3"),
        ("S\tu\t*\tLN:i:x\n", "invalid length"),
    ];
    for (gfa, expected) in cases.iter() {
        let result = read_gfa(&mut gfa.as_bytes());
        let err = result.err().unwrap_or_else(|| panic!("Malformed input {:?} was accepted", gfa));
        assert!(err.contains(expected), "Error {:?} does not mention {:?}", err, expected);
    }
}

//-----------------------------------------------------------------------------

#[test]
fn write_read_round_trip() {
    let mut input = EXAMPLE.as_bytes();
    let graph = read_gfa(&mut input).unwrap();

    let mut first = Vec::new();
    write_gfa(&graph, &mut first).unwrap();
    let reloaded = read_gfa(&mut first.as_slice()).unwrap();
    let mut second = Vec::new();
    write_gfa(&reloaded, &mut second).unwrap();
    assert_eq!(
        String::from_utf8(first).unwrap(),
        String::from_utf8(second).unwrap(),
        "GFA output does not round-trip"
    );
}

#[test]
fn deleted_segments_are_not_written() {
    let mut input = EXAMPLE.as_bytes();
    let mut graph = read_gfa(&mut input).unwrap();
    let b1 = graph.segment_by_name("b1").unwrap();
    graph.set_deleted(b1, true);
    graph.compact_arcs();

    let mut output = Vec::new();
    write_gfa(&graph, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(!text.contains("b1"), "A deleted segment leaked into the output:\n{}", text);
    let reloaded = read_gfa(&mut text.as_bytes()).unwrap();
    assert_eq!(reloaded.segment_count(), 2, "Wrong segment count after subsetting");
}

#[test]
fn gzip_compressed_input() {
    let path = env::temp_dir().join(format!("gfa-kit-{}.gfa.gz", process::id()));
    {
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(EXAMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    assert!(utils::is_gzipped(&path), "The test file does not look gzip-compressed");
    let mut reader = utils::open_file(&path).unwrap();
    let graph = read_gfa(reader.as_mut()).unwrap();
    assert_eq!(graph.segment_count(), 3, "Wrong segment count from compressed input");

    fs::remove_file(&path).unwrap();
}

//-----------------------------------------------------------------------------
