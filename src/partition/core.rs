/// A worker's contiguous byte range of the input, `[start, end)`.
///
/// Segments are non-overlapping and their union is exactly `[0, file_size)`.
/// Every worker computes its own segment from the same `(file_size, workers)`
/// pair, so agreeing on the partition needs no communication beyond sharing
/// the file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Base segment length: `file_size / workers` by integer division.
/// Worker ids are also seeded from this value, so it is exposed separately.
#[inline]
pub fn segment_size(file_size: usize, workers: usize) -> usize {
    debug_assert!(workers > 0);
    file_size / workers
}

/// Compute worker `rank`'s segment. Pure and deterministic.
///
/// Every worker gets `segment_size` bytes except the last, which extends to
/// `file_size` to absorb the integer-division remainder. With more workers
/// than bytes, `segment_size` is 0: all workers but the last get an empty
/// segment and the last gets the whole file.
#[inline]
pub fn segment_for(file_size: usize, workers: usize, rank: usize) -> Segment {
    debug_assert!(rank < workers);
    let size = segment_size(file_size, workers);
    let start = rank * size;
    let end = if rank == workers - 1 {
        file_size
    } else {
        (rank + 1) * size
    };
    Segment { start, end }
}
