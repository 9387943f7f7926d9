use super::*;

//-----------------------------------------------------------------------------

fn check_region(text: &str, name: &str, interval: Range<usize>) {
    let region = parse_region(text);
    assert_eq!(region.name, name, "Wrong name for region string {:?}", text);
    assert_eq!(region.interval, interval, "Wrong interval for region string {:?}", text);
}

#[test]
fn full_intervals() {
    check_region("chr1:100-200", "chr1", 99..200);
    check_region("chr1:1-1", "chr1", 0..1);
    check_region("scaffold_17:5000-6000", "scaffold_17", 4999..6000);
}

#[test]
fn open_ended_intervals() {
    check_region("chr1", "chr1", 0..OPEN_END);
    check_region("chr1:100", "chr1", 99..OPEN_END);
    check_region("chr1:", "chr1", 0..OPEN_END);
}

#[test]
fn comma_separated_digits() {
    check_region("chr1:1,000-2,000", "chr1", 999..2000);
    check_region("chr1:12,345", "chr1", 12344..OPEN_END);
}

#[test]
fn start_clamps_to_zero() {
    check_region("chr1:0-10", "chr1", 0..10);
    check_region("chr1:1-10", "chr1", 0..10);
}

#[test]
fn malformed_suffixes_become_part_of_the_name() {
    // Non-numeric suffix.
    check_region("weird:abc", "weird:abc", 0..OPEN_END);
    // More than one hyphen.
    check_region("chr1:100-200-300", "chr1:100-200-300", 0..OPEN_END);
    // Inverted interval.
    check_region("chr1:200-100", "chr1:200-100", 0..OPEN_END);
    // No colon at all.
    check_region("plain name", "plain name", 0..OPEN_END);
}

#[test]
fn last_colon_wins() {
    // Only the part after the last colon is an interval candidate.
    check_region("group:chr1:100-200", "group:chr1", 99..200);
    check_region("group:chr1:abc", "group:chr1:abc", 0..OPEN_END);
}

#[test]
fn empty_input() {
    check_region("", "", 0..OPEN_END);
}

//-----------------------------------------------------------------------------
