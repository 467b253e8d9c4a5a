#![allow(clippy::manual_range_contains, clippy::needless_range_loop)]

/// Use mimalloc as the global allocator.
/// 2-3x faster than glibc malloc for small allocations, with better
/// thread-local caching — the word table does many small string allocs.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod error;
pub mod job;
pub mod partition;
pub mod report;
pub mod scan;
pub mod stitch;
pub mod table;
pub mod wire;

pub use error::FreqError;
