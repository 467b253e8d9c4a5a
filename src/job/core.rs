use std::sync::mpsc::{channel, Receiver};
use std::thread;

use crate::common::debug_log;
use crate::error::FreqError;
use crate::partition::{segment_for, segment_size};
use crate::scan::scan_segment;
use crate::stitch::{link_ranks, stitch_boundaries, RankLinks};
use crate::table::{CharHistogram, IdCounter, WordTable};
use crate::wire;

/// Global result assembled at the coordinator.
#[derive(Debug)]
pub struct GlobalReport {
    pub histogram: CharHistogram,
    pub words: WordTable,
}

/// One worker's contribution to the final gather: its histogram for the
/// elementwise reduction and its serialized word table for the collection.
struct WorkerReport {
    rank: usize,
    histogram: CharHistogram,
    payload: Vec<u8>,
}

/// Run the whole pipeline over `data` with a fixed worker count.
///
/// Each worker is an OS thread scanning a disjoint byte range of `data`;
/// the only inter-worker traffic is the one-hop boundary fragment exchange
/// and the final all-to-one report. The calling thread acts as coordinator.
///
/// Fail-fast: a worker that errors sends its error to the coordinator and
/// drops its fragment links, so blocked neighbors observe `WorkerLost`
/// instead of hanging, and the whole job tears down.
pub fn run(data: &[u8], workers: usize) -> Result<GlobalReport, FreqError> {
    if workers == 0 {
        return Err(FreqError::NoWorkers);
    }

    let size = segment_size(data.len(), workers);
    let mut links = link_ranks(workers);
    let (report_tx, report_rx) = channel::<Result<WorkerReport, FreqError>>();

    thread::scope(|s| {
        for (rank, rank_links) in links.drain(..).enumerate() {
            let tx = report_tx.clone();
            s.spawn(move || {
                let result = worker_pass(data, rank, workers, size, rank_links);
                // coordinator gone means the job already failed; nothing
                // left for this worker to report to
                let _ = tx.send(result);
            });
        }
        // scope holds the original sender; drop it so the coordinator's
        // receive loop sees disconnect if workers die without reporting
        drop(report_tx);

        collect(&report_rx, workers)
    })
}

/// One worker's full pass: partition, scan, boundary stitch, serialize.
fn worker_pass(
    data: &[u8],
    rank: usize,
    workers: usize,
    size: usize,
    links: RankLinks,
) -> Result<WorkerReport, FreqError> {
    // the receive from rank-1 was posted when the links were built, before
    // any scanning started; the scan below overlaps with that transfer
    let seg = segment_for(data.len(), workers, rank);
    let bytes = &data[seg.start..seg.end];
    debug_log(rank, &format!("scanning [{}, {})", seg.start, seg.end));

    let mut out = scan_segment(
        bytes,
        IdCounter::seeded(rank, size),
        rank > 0,
        rank + 1 < workers,
    );
    stitch_boundaries(seg.len(), &mut out, links)?;

    let payload = wire::serialize(&out.table);
    debug_log(
        rank,
        &format!("{} words, {} payload bytes", out.table.len(), payload.len()),
    );
    Ok(WorkerReport {
        rank,
        histogram: out.histogram,
        payload,
    })
}

/// Coordinator side: reduce histograms and gather word tables.
///
/// The gather is two-phase like the classic collective: per-worker payload
/// lengths first, prefix-summed into offsets, then each payload is placed
/// at its offset in one contiguous buffer which is deserialized in a single
/// pass. Scanning the buffer in rank order makes the retained id for a
/// duplicated word deterministic (lowest rank wins).
fn collect(rx: &Receiver<Result<WorkerReport, FreqError>>, workers: usize) -> Result<GlobalReport, FreqError> {
    let mut histogram = CharHistogram::new();
    let mut payloads: Vec<Option<Vec<u8>>> = (0..workers).map(|_| None).collect();

    for _ in 0..workers {
        let report = match rx.recv() {
            Ok(r) => r?,
            // a worker died without reporting (panic); name the first
            // rank we never heard from
            Err(_) => {
                let rank = payloads.iter().position(|p| p.is_none()).unwrap_or(0);
                return Err(FreqError::WorkerLost { rank });
            }
        };
        histogram.add(&report.histogram);
        payloads[report.rank] = Some(report.payload);
    }

    // phase 1: lengths → prefix-sum offsets
    let mut offsets = Vec::with_capacity(workers);
    let mut total = 0usize;
    for payload in &payloads {
        offsets.push(total);
        total += payload.as_ref().map_or(0, |p| p.len());
    }

    // phase 2: place each worker's bytes at its offset, then parse once
    let mut buffer = vec![0u8; total];
    for (payload, &offset) in payloads.iter().zip(&offsets) {
        if let Some(p) = payload {
            buffer[offset..offset + p.len()].copy_from_slice(p);
        }
    }
    let words = wire::deserialize(&buffer)?;

    Ok(GlobalReport { histogram, words })
}

/// Single-pass sequential scan of the whole input. This is both the
/// one-worker fast path's semantics and the reference the partitioned run
/// must agree with byte for byte.
pub fn run_sequential(data: &[u8]) -> GlobalReport {
    let out = scan_segment(data, IdCounter::seeded(0, data.len()), false, false);
    GlobalReport {
        histogram: out.histogram,
        words: out.table,
    }
}
