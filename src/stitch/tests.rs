use super::*;
use crate::scan::scan_segment;
use crate::table::IdCounter;

fn scan(data: &[u8], rank: usize, workers: usize) -> crate::scan::ScanOutput {
    scan_segment(
        data,
        IdCounter::seeded(rank, 1000),
        rank > 0,
        rank + 1 < workers,
    )
}

// Channels are buffered, so stitching ranks in ascending order on one
// thread exercises the same message flow as concurrent workers.

#[test]
fn test_split_word_reassembled_once() {
    // "helloworld" cut between "hello" and "world"
    let mut links = link_ranks(2);
    let w1_links = links.pop().unwrap();
    let w0_links = links.pop().unwrap();

    let mut w0 = scan(b"say hellow", 0, 2);
    let mut w1 = scan(b"orld again", 1, 2);
    assert_eq!(w0.trailing, "hellow");
    assert_eq!(w1.leading, "orld");

    stitch_boundaries(10, &mut w0, w0_links).unwrap();
    stitch_boundaries(10, &mut w1, w1_links).unwrap();

    // attributed to the receiving worker only
    assert!(w0.table.get("helloworld").is_none());
    assert_eq!(w1.table.get("helloworld").unwrap().freq, 1);
    // never recorded as the two halves
    assert!(w0.table.get("hellow").is_none());
    assert!(w1.table.get("orld").is_none());
}

#[test]
fn test_clean_boundary_sends_empty_fragment() {
    // boundary falls on a space: both fragments empty, no ghost entries
    let mut links = link_ranks(2);
    let w1_links = links.pop().unwrap();
    let w0_links = links.pop().unwrap();

    let mut w0 = scan(b"one two ", 0, 2);
    let mut w1 = scan(b"three", 1, 2);
    stitch_boundaries(8, &mut w0, w0_links).unwrap();
    stitch_boundaries(5, &mut w1, w1_links).unwrap();

    assert_eq!(w0.table.len(), 2);
    assert_eq!(w1.table.get("three").unwrap().freq, 1);
    assert_eq!(w1.table.len(), 1);
}

#[test]
fn test_word_spanning_three_tiny_segments() {
    // "abc" split into 1-byte segments: the middle worker's whole segment
    // is one run, so the fragment must pass through it
    let mut links = link_ranks(3);
    let w2_links = links.pop().unwrap();
    let w1_links = links.pop().unwrap();
    let w0_links = links.pop().unwrap();

    let mut w0 = scan(b"a", 0, 3);
    let mut w1 = scan(b"b", 1, 3);
    let mut w2 = scan(b"c", 2, 3);

    stitch_boundaries(1, &mut w0, w0_links).unwrap();
    stitch_boundaries(1, &mut w1, w1_links).unwrap();
    stitch_boundaries(1, &mut w2, w2_links).unwrap();

    assert!(w0.table.is_empty());
    assert!(w1.table.is_empty());
    assert_eq!(w2.table.get("abc").unwrap().freq, 1);
    assert_eq!(w2.table.len(), 1);
}

#[test]
fn test_empty_middle_segment_passes_fragment_through() {
    let mut links = link_ranks(3);
    let w2_links = links.pop().unwrap();
    let w1_links = links.pop().unwrap();
    let w0_links = links.pop().unwrap();

    let mut w0 = scan(b"ca", 0, 3);
    let mut w1 = scan(b"", 1, 3);
    let mut w2 = scan(b"t", 2, 3);

    stitch_boundaries(2, &mut w0, w0_links).unwrap();
    stitch_boundaries(0, &mut w1, w1_links).unwrap();
    stitch_boundaries(1, &mut w2, w2_links).unwrap();

    assert_eq!(w2.table.get("cat").unwrap().freq, 1);
}

#[test]
fn test_oversized_fragment_rejected() {
    let mut links = link_ranks(2);
    let _w1_links = links.pop().unwrap();
    let w0_links = links.pop().unwrap();

    let long = "a".repeat(MAX_FRAGMENT_LEN + 1);
    let data = format!("x {}", long);
    let mut w0 = scan(data.as_bytes(), 0, 2);
    let err = stitch_boundaries(data.len(), &mut w0, w0_links).unwrap_err();
    match err {
        crate::FreqError::FragmentTooLong { len, max } => {
            assert_eq!(len, MAX_FRAGMENT_LEN + 1);
            assert_eq!(max, MAX_FRAGMENT_LEN);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_fragment_at_cap_is_accepted() {
    let mut links = link_ranks(2);
    let w1_links = links.pop().unwrap();
    let w0_links = links.pop().unwrap();

    let long = "a".repeat(MAX_FRAGMENT_LEN);
    let data = format!("x {}", long);
    let mut w0 = scan(data.as_bytes(), 0, 2);
    stitch_boundaries(data.len(), &mut w0, w0_links).unwrap();

    let mut w1 = scan(b"!", 1, 2);
    stitch_boundaries(1, &mut w1, w1_links).unwrap();
    assert_eq!(w1.table.get(long.as_str()).unwrap().freq, 1);
}

#[test]
fn test_dead_peer_surfaces_as_worker_lost() {
    let mut links = link_ranks(2);
    let w1_links = links.pop().unwrap();
    let w0_links = links.pop().unwrap();

    // worker 0 dies before sending: its links are dropped
    drop(w0_links);

    let mut w1 = scan(b"rest", 1, 2);
    let err = stitch_boundaries(4, &mut w1, w1_links).unwrap_err();
    assert!(matches!(err, crate::FreqError::WorkerLost { rank: 0 }));
}

#[test]
fn test_link_ranks_topology() {
    let links = link_ranks(4);
    assert!(links[0].from_prev.is_none());
    assert!(links[0].to_next.is_some());
    assert!(links[1].from_prev.is_some());
    assert!(links[1].to_next.is_some());
    assert!(links[3].from_prev.is_some());
    assert!(links[3].to_next.is_none());

    let links = link_ranks(1);
    assert!(links[0].from_prev.is_none());
    assert!(links[0].to_next.is_none());
}
