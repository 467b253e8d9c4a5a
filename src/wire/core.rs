use memchr::{memchr, memchr_iter};

use crate::error::FreqError;
use crate::table::WordTable;

/// Field delimiter. Words are alphanumeric-only, so `:` can never appear
/// inside one and needs no escaping.
const DELIM: u8 = b':';

/// Flatten a word table into newline-terminated `word:freq:id` records.
///
/// Record order follows table iteration order and is not significant: the
/// merge on the receiving side is keyed by word, and duplicate keys cannot
/// occur within one worker's table.
pub fn serialize(table: &WordTable) -> Vec<u8> {
    // word + 2 delimiters + 2 short numbers + newline ≈ 16 bytes/record
    let mut out = Vec::with_capacity(table.len() * 16);
    let mut freq_buf = itoa::Buffer::new();
    let mut id_buf = itoa::Buffer::new();
    for (word, stat) in table.iter() {
        out.extend_from_slice(word.as_bytes());
        out.push(DELIM);
        out.extend_from_slice(freq_buf.format(stat.freq).as_bytes());
        out.push(DELIM);
        out.extend_from_slice(id_buf.format(stat.id).as_bytes());
        out.push(b'\n');
    }
    out
}

/// Parse serialized records into `table`, merging as it goes: a word the
/// table already holds gets its frequency summed and keeps its existing id;
/// a new word adopts the parsed id.
///
/// An unparsable record aborts the whole merge — gathered bytes that fail
/// to parse mean the buffer cannot be trusted, and there is no partial-
/// result mode to fall back to.
pub fn deserialize_into(data: &[u8], table: &mut WordTable) -> Result<(), FreqError> {
    let mut start = 0;
    for nl in memchr_iter(b'\n', data) {
        let line = &data[start..nl];
        start = nl + 1;
        if line.is_empty() {
            continue;
        }
        let (word, freq, id) = parse_record(line)?;
        table.absorb(word.to_owned(), freq, id);
    }
    // trailing bytes without a final newline are still one record
    if start < data.len() {
        let (word, freq, id) = parse_record(&data[start..])?;
        table.absorb(word.to_owned(), freq, id);
    }
    Ok(())
}

/// Parse a whole buffer into a fresh table.
pub fn deserialize(data: &[u8]) -> Result<WordTable, FreqError> {
    let mut table = WordTable::new();
    deserialize_into(data, &mut table)?;
    Ok(table)
}

/// Split one `word:freq:id` line into its fields.
fn parse_record(line: &[u8]) -> Result<(&str, u64, u64), FreqError> {
    let malformed = || FreqError::MalformedRecord {
        record: String::from_utf8_lossy(line).into_owned(),
    };

    let first = memchr(DELIM, line).ok_or_else(malformed)?;
    let rest = &line[first + 1..];
    let second = memchr(DELIM, rest).ok_or_else(malformed)?;

    let word = std::str::from_utf8(&line[..first]).map_err(|_| malformed())?;
    if word.is_empty() {
        return Err(malformed());
    }
    let freq: u64 = std::str::from_utf8(&rest[..second])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(malformed)?;
    let id: u64 = std::str::from_utf8(&rest[second + 1..])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(malformed)?;

    Ok((word, freq, id))
}
