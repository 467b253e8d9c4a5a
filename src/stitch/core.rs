use std::mem;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::error::FreqError;
use crate::scan::ScanOutput;

/// A word fragment in flight between adjacent workers: a lowercased
/// alphanumeric run cut off by a segment boundary.
pub type Fragment = String;

/// Cap on a transmitted fragment. A fragment longer than this is rejected
/// (never truncated) and aborts the whole run.
pub const MAX_FRAGMENT_LEN: usize = 256;

/// The receive a non-first worker posts before scanning its own segment.
///
/// Holding the `Receiver` lets the previous worker's send complete in the
/// background while this worker scans; `wait` is the single blocking point,
/// called only after this worker has finished its own scan and send.
pub struct PendingFragment {
    /// Rank of the sender this receive is waiting on.
    rank: usize,
    rx: Receiver<Fragment>,
}

impl PendingFragment {
    /// Block until the previous worker's trailing fragment arrives.
    /// A disconnected channel means the peer died before sending; that is
    /// the fail-fast abort path, not a silent empty fragment.
    pub fn wait(self) -> Result<Fragment, FreqError> {
        self.rx
            .recv()
            .map_err(|_| FreqError::WorkerLost { rank: self.rank })
    }
}

/// Sending half of the one-hop link toward the next-higher rank.
pub struct FragmentTx {
    /// Rank of the receiver on the other end.
    rank: usize,
    tx: Sender<Fragment>,
}

impl FragmentTx {
    /// Hand the trailing fragment to the next worker. Consumes the link:
    /// each boundary carries exactly one fragment.
    pub fn send(self, frag: Fragment) -> Result<(), FreqError> {
        if frag.len() > MAX_FRAGMENT_LEN {
            return Err(FreqError::FragmentTooLong {
                len: frag.len(),
                max: MAX_FRAGMENT_LEN,
            });
        }
        self.tx
            .send(frag)
            .map_err(|_| FreqError::WorkerLost { rank: self.rank })
    }
}

/// One worker's endpoints in the rank topology: the pending receive from
/// rank-1 (absent for the first worker) and the send link to rank+1
/// (absent for the last).
pub struct RankLinks {
    pub from_prev: Option<PendingFragment>,
    pub to_next: Option<FragmentTx>,
}

/// Build the chain of one-hop links for `workers` ranks.
/// `out[r].to_next` feeds `out[r+1].from_prev`; nothing else is connected.
pub fn link_ranks(workers: usize) -> Vec<RankLinks> {
    let mut links: Vec<RankLinks> = (0..workers)
        .map(|_| RankLinks {
            from_prev: None,
            to_next: None,
        })
        .collect();
    for r in 0..workers.saturating_sub(1) {
        let (tx, rx) = channel();
        links[r].to_next = Some(FragmentTx { rank: r + 1, tx });
        links[r + 1].from_prev = Some(PendingFragment { rank: r, rx });
    }
    links
}

/// Complete the boundary exchange for one worker after its scan.
///
/// Normal path: forward the trailing fragment first (the next worker may
/// already be waiting on it), then wait for the previous worker's fragment
/// and insert `received + leading` into this worker's table — the combined
/// word is attributed to the receiving worker, never the sender.
///
/// Degenerate path: when the leading run consumed the entire segment and a
/// next worker exists, the word continues past this worker on both sides.
/// The trailing fragment is then not known until the receive completes, so
/// this worker waits first and forwards `received + leading` onward instead
/// of inserting it. This keeps words intact even when segments are shorter
/// than the words crossing them.
pub fn stitch_boundaries(
    segment_len: usize,
    out: &mut ScanOutput,
    links: RankLinks,
) -> Result<(), FreqError> {
    match (links.from_prev, links.to_next) {
        (prev, Some(tx)) if out.leading_spans_segment(segment_len) => {
            let mut combined = match prev {
                Some(pending) => pending.wait()?,
                None => Fragment::new(),
            };
            combined.push_str(&out.leading);
            tx.send(combined)
        }
        (prev, next) => {
            if let Some(tx) = next {
                tx.send(mem::take(&mut out.trailing))?;
            }
            if let Some(pending) = prev {
                let mut word = pending.wait()?;
                word.push_str(&out.leading);
                out.table.record(&word, &mut out.ids);
            }
            Ok(())
        }
    }
}
