use super::*;

use crate::graph::Segment;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//-----------------------------------------------------------------------------

// A chain s0 -> s1 -> s2 -> s3 -> s4 with a side branch s2 -> alt.
fn chain_with_branch() -> Graph {
    let mut graph = Graph::new();
    let ids: Vec<usize> = (0..5)
        .map(|i| graph.add_segment(Segment::new(&format!("s{}", i), i + 1)))
        .collect();
    for pair in ids.windows(2) {
        graph.add_link(
            Vertex::new(pair[0], Orientation::Forward),
            Vertex::new(pair[1], Orientation::Forward),
            None,
        );
    }
    let alt = graph.add_segment(Segment::new("alt", 7));
    graph.add_link(Vertex::new(ids[2], Orientation::Forward), Vertex::new(alt, Orientation::Forward), None);
    graph
}

fn kept_names(graph: &Graph) -> Vec<String> {
    let mut names: Vec<String> = graph
        .segments()
        .filter(|(_, segment)| !segment.is_deleted())
        .map(|(_, segment)| segment.name.clone())
        .collect();
    names.sort();
    names
}

//-----------------------------------------------------------------------------

#[test]
fn zero_step_keeps_exactly_the_seeds() {
    let mut graph = chain_with_branch();
    extract(&mut graph, &["s1", "s3"], 0);
    assert_eq!(kept_names(&graph), vec!["s1", "s3"], "Wrong kept set for step 0");
    assert_eq!(graph.arc_count(), 0, "Arcs between deleted segments survived compaction");
}

#[test]
fn radius_grows_with_step() {
    for (step, truth) in [
        (0, vec!["s2"]),
        (1, vec!["alt", "s1", "s3"]),
        (2, vec!["alt", "s0", "s1", "s3", "s4"]),
    ] {
        let mut graph = chain_with_branch();
        extract(&mut graph, &["s2"], step);
        let mut expected: Vec<String> = truth.iter().map(|x| x.to_string()).collect();
        if step > 0 {
            expected.push(String::from("s2"));
        }
        expected.sort();
        assert_eq!(kept_names(&graph), expected, "Wrong kept set for step {}", step);
    }
}

#[test]
fn seeds_reachable_through_reverse_orientation() {
    // The only link is s0+ -> s1+. Seeding on s1 must still reach s0,
    // through the complement arc s1- -> s0-.
    let mut graph = Graph::new();
    let a = graph.add_segment(Segment::new("s0", 3));
    let b = graph.add_segment(Segment::new("s1", 3));
    graph.add_link(Vertex::new(a, Orientation::Forward), Vertex::new(b, Orientation::Forward), None);
    extract(&mut graph, &["s1"], 1);
    assert_eq!(kept_names(&graph), vec!["s0", "s1"], "The predecessor was not reached from the reverse orientation");
}

#[test]
fn empty_seed_list_is_a_no_op() {
    let mut graph = chain_with_branch();
    let before = graph.clone();
    extract(&mut graph, &[] as &[&str], 2);
    assert_eq!(graph, before, "An empty seed list modified the graph");
}

#[test]
fn unknown_seeds_are_ignored() {
    let mut graph = chain_with_branch();
    extract(&mut graph, &["nonexistent", "s2", "also-missing"], 0);
    assert_eq!(kept_names(&graph), vec!["s2"], "Unknown seed names were not ignored");
}

#[test]
fn only_unknown_seeds_delete_everything() {
    let mut graph = chain_with_branch();
    extract(&mut graph, &["nonexistent"], 5);
    assert!(kept_names(&graph).is_empty(), "Unresolvable seeds left segments behind");
    assert_eq!(graph.arc_count(), 0, "Arcs survived after every segment was deleted");
}

//-----------------------------------------------------------------------------

fn random_graph(rng: &mut StdRng, segments: usize, links: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 0..segments {
        graph.add_segment(Segment::new(&format!("n{}", i), rng.gen_range(1..100)));
    }
    for _ in 0..links {
        let from = Vertex::from_id(rng.gen_range(0..2 * segments));
        let to = Vertex::from_id(rng.gen_range(0..2 * segments));
        graph.add_link(from, to, None);
    }
    graph
}

#[test]
fn extraction_is_deterministic_on_fresh_graphs() {
    let mut rng = StdRng::seed_from_u64(0x1234_5678);
    for trial in 0..10 {
        let graph = random_graph(&mut rng, 30, 45);
        let seeds = [format!("n{}", rng.gen_range(0..30)), format!("n{}", rng.gen_range(0..30))];
        let step = rng.gen_range(0..4);

        let mut first = graph.clone();
        let mut second = graph.clone();
        extract(&mut first, &seeds, step);
        extract(&mut second, &seeds, step);
        assert_eq!(
            kept_names(&first), kept_names(&second),
            "Different kept sets for seeds {:?}, step {} in trial {}", seeds, step, trial
        );
        assert_eq!(first, second, "Different graphs for seeds {:?}, step {} in trial {}", seeds, step, trial);
    }
}

//-----------------------------------------------------------------------------
