use crate::table::{CharHistogram, IdCounter, WordTable};

/// Alphanumeric lookup table for word-boundary detection in the hot loop.
/// `ALNUM_TABLE[byte] == 1` for ASCII 0-9, A-Z, a-z; `0` otherwise.
const fn make_alnum_table() -> [u8; 256] {
    let mut t = [0u8; 256];
    let mut b = b'0';
    while b <= b'9' {
        t[b as usize] = 1;
        b += 1;
    }
    let mut b = b'A';
    while b <= b'Z' {
        t[b as usize] = 1;
        b += 1;
    }
    let mut b = b'a';
    while b <= b'z' {
        t[b as usize] = 1;
        b += 1;
    }
    t
}

const ALNUM_TABLE: [u8; 256] = make_alnum_table();

/// True if `b` is an ASCII alphanumeric byte (part of a word).
#[inline]
pub fn is_word_byte(b: u8) -> bool {
    ALNUM_TABLE[b as usize] == 1
}

/// Everything one worker produces from a single pass over its segment.
#[derive(Debug)]
pub struct ScanOutput {
    pub histogram: CharHistogram,
    pub table: WordTable,
    /// Lowercased alphanumeric run at the segment start. Non-empty only for
    /// non-first workers; incomplete until joined with the previous worker's
    /// trailing fragment.
    pub leading: String,
    /// Lowercased alphanumeric run at the segment end. Non-empty only for
    /// non-last workers; the last worker flushes it into `table` directly.
    pub trailing: String,
    /// Id counter after the scan, for the stitch-time insert of the
    /// reassembled boundary word.
    pub ids: IdCounter,
}

impl ScanOutput {
    /// True if the scan never left the leading fragment, i.e. the whole
    /// segment is one alphanumeric run (or the segment is empty). The word
    /// then spans past this worker on both sides and must be forwarded, not
    /// inserted (see the stitcher).
    pub fn leading_spans_segment(&self, segment_len: usize) -> bool {
        self.leading.len() == segment_len
    }
}

/// Scan one segment in a single forward pass.
///
/// `has_prev` / `has_next` describe the worker's position in the rank
/// topology: only a non-first worker peels a leading fragment, and only a
/// non-last worker withholds its trailing fragment from the table.
///
/// Every printable byte in the segment is histogram-counted exactly once,
/// whether or not it is part of a word.
pub fn scan_segment(
    data: &[u8],
    mut ids: IdCounter,
    has_prev: bool,
    has_next: bool,
) -> ScanOutput {
    let mut histogram = CharHistogram::new();
    let mut table = WordTable::new();

    // Step 1: a non-first worker's opening alphanumeric run may continue a
    // word begun in the previous segment, so it is set aside instead of
    // scanned as a normal word.
    let mut leading = String::new();
    let mut pos = 0usize;
    if has_prev {
        while pos < data.len() && is_word_byte(data[pos]) {
            histogram.count(data[pos]);
            leading.push(data[pos].to_ascii_lowercase() as char);
            pos += 1;
        }
    }

    // Step 2: main pass. Word bytes accumulate lowercased; any delimiter
    // flushes the current word into the table.
    let mut current = String::new();
    for &b in &data[pos..] {
        histogram.count(b);
        if is_word_byte(b) {
            current.push(b.to_ascii_lowercase() as char);
        } else if !current.is_empty() {
            table.record(&current, &mut ids);
            current.clear();
        }
    }

    // Step 3: a word still open at segment end is the trailing fragment.
    // With no next worker there is nothing to extend it, so it is complete.
    let trailing = if has_next {
        current
    } else {
        table.record(&current, &mut ids);
        String::new()
    };

    ScanOutput {
        histogram,
        table,
        leading,
        trailing,
        ids,
    }
}
