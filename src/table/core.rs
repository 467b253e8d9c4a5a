use std::collections::HashMap;

/// Number of histogram slots: one per 7-bit byte value.
pub const ASCII_RANGE: usize = 128;

/// Low end of the counted printable range (space).
pub const PRINTABLE_LO: u8 = 32;
/// High end of the counted printable range (tilde). DEL (127) is excluded.
pub const PRINTABLE_HI: u8 = 126;

/// Fixed 128-slot character histogram indexed by byte value.
///
/// Only printable bytes (32..=126) are ever counted; the remaining slots
/// stay zero. Elementwise addition is commutative and associative, so the
/// global reduction over all workers is order-independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharHistogram {
    counts: [u64; ASCII_RANGE],
}

impl Default for CharHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl CharHistogram {
    pub fn new() -> Self {
        CharHistogram {
            counts: [0; ASCII_RANGE],
        }
    }

    /// Count one byte if it falls in the printable range.
    #[inline]
    pub fn count(&mut self, b: u8) {
        if b >= PRINTABLE_LO && b <= PRINTABLE_HI {
            self.counts[b as usize] += 1;
        }
    }

    #[inline]
    pub fn get(&self, b: u8) -> u64 {
        self.counts[b as usize]
    }

    /// Elementwise sum of another histogram into this one.
    pub fn add(&mut self, other: &CharHistogram) {
        for i in 0..ASCII_RANGE {
            self.counts[i] += other.counts[i];
        }
    }

    /// Iterate `(byte, count)` over slots with a nonzero count.
    pub fn nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i as u8, c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

/// Frequency and first-seen ordinal for one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordStat {
    pub freq: u64,
    pub id: u64,
}

/// Monotonic word-id source. Each worker seeds its counter from
/// `rank * segment_size + 1` so ids from different workers do not trivially
/// collide for small worker counts. Uniqueness after the global merge is
/// not guaranteed for arbitrary segment shapes; the merge keeps the
/// first-encountered id per word (see `WordTable::absorb`).
#[derive(Debug, Clone, Copy)]
pub struct IdCounter(u64);

impl IdCounter {
    pub fn seeded(rank: usize, segment_size: usize) -> Self {
        IdCounter((rank as u64) * (segment_size as u64) + 1)
    }

    #[inline]
    pub fn next(&mut self) -> u64 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// Mapping from lowercase alphanumeric word to `(frequency, first-seen id)`.
///
/// Populated per worker during the scan, then merged globally at the
/// coordinator. Merging sums frequencies for matching keys; the retained id
/// is whichever the table saw first, so merge order decides it (the
/// coordinator merges in rank order to keep the result deterministic).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTable {
    entries: HashMap<String, WordStat>,
}

impl WordTable {
    pub fn new() -> Self {
        WordTable::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&WordStat> {
        self.entries.get(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WordStat)> {
        self.entries.iter().map(|(w, s)| (w.as_str(), s))
    }

    /// Record one occurrence observed during scanning: insert with
    /// frequency 1 and a fresh id, or bump the existing frequency.
    /// Empty words are ignored so delimiter runs never create entries.
    pub fn record(&mut self, word: &str, ids: &mut IdCounter) {
        if word.is_empty() {
            return;
        }
        match self.entries.get_mut(word) {
            Some(stat) => stat.freq += 1,
            None => {
                let id = ids.next();
                self.entries.insert(word.to_owned(), WordStat { freq: 1, id });
            }
        }
    }

    /// Merge-style insert: sum frequencies for a known key and keep the
    /// existing id, otherwise adopt the incoming `(freq, id)` as-is.
    pub fn absorb(&mut self, word: String, freq: u64, id: u64) {
        self.entries
            .entry(word)
            .and_modify(|stat| stat.freq += freq)
            .or_insert(WordStat { freq, id });
    }

    /// Fold another table into this one. Frequencies are summed per key,
    /// so the total-frequency content is independent of merge order.
    pub fn merge(&mut self, other: WordTable) {
        for (word, stat) in other.entries {
            self.absorb(word, stat.freq, stat.id);
        }
    }
}
