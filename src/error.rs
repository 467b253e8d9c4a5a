use thiserror::Error;

/// Errors surfaced by the partitioned frequency pipeline.
///
/// Every variant is fatal to the whole run: the job is one-shot batch work
/// with no retry or partial-result mode. A worker that hits any of these
/// drops its channel endpoints, which surfaces as `WorkerLost` on adjacent
/// workers and the coordinator, tearing the job down instead of leaving
/// peers blocked on a dead sender.
#[derive(Debug, Error)]
pub enum FreqError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A boundary fragment exceeded the transmissible cap. Rejection, not
    /// truncation: silently shortening a word would corrupt the table.
    #[error("boundary fragment of {len} bytes exceeds the {max}-byte limit")]
    FragmentTooLong { len: usize, max: usize },

    /// A serialized record failed to parse during the merge. Policy:
    /// abort the merge rather than skip — a corrupt record means the
    /// gathered buffer cannot be trusted.
    #[error("malformed serialized record: {record:?}")]
    MalformedRecord { record: String },

    /// A peer's channel endpoint closed before its message arrived or could
    /// be delivered; `rank` names the worker that went away.
    #[error("lost contact with worker {rank} before the run completed")]
    WorkerLost { rank: usize },

    #[error("worker count must be at least 1")]
    NoWorkers,
}
