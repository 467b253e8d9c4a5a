use crate::table::{CharHistogram, WordTable};

/// How many entries each output table shows.
pub const TOP_K: usize = 10;

/// One row of the ranked word table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedWord {
    pub word: String,
    pub id: u64,
    pub freq: u64,
}

/// Select the `k` most frequent characters, descending by frequency.
/// Equal frequencies rank by ascending byte value, so the result is fully
/// deterministic. Zero-count slots never appear.
///
/// A full sort of the occupied slots is fine here: there are at most 95.
pub fn top_chars(histogram: &CharHistogram, k: usize) -> Vec<(u8, u64)> {
    let mut ranked: Vec<(u8, u64)> = histogram.nonzero().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

/// Select the `k` most frequent words, descending by frequency, ties broken
/// by ascending id — the earliest-observed word wins.
pub fn top_words(table: &WordTable, k: usize) -> Vec<RankedWord> {
    let mut ranked: Vec<RankedWord> = table
        .iter()
        .map(|(word, stat)| RankedWord {
            word: word.to_owned(),
            id: stat.id,
            freq: stat.freq,
        })
        .collect();
    ranked.sort_by(|a, b| b.freq.cmp(&a.freq).then(a.id.cmp(&b.id)));
    ranked.truncate(k);
    ranked
}
