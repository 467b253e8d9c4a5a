pub mod io;

/// Reset SIGPIPE to default behavior (SIG_DFL).
/// Rust sets SIGPIPE to SIG_IGN by default, but command-line tools are
/// expected to die quietly when their output pipe closes (exit 141).
/// Must be called at the start of main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Format an IO error message without the "(os error N)" suffix.
/// Rust's Display impl appends " (os error 2)" to e.g. "No such file or
/// directory"; strip it so diagnostics read like the classic tools'.
pub fn io_error_msg(e: &std::io::Error) -> String {
    if let Some(raw) = e.raw_os_error() {
        let os_err = std::io::Error::from_raw_os_error(raw);
        let msg = format!("{}", os_err);
        msg.replace(&format!(" (os error {})", raw), "")
    } else {
        format!("{}", e)
    }
}

/// Rank-tagged debug line on stderr, enabled by `FFREQ_DEBUG=1`.
/// The env var is read once per process.
pub fn debug_log(rank: usize, msg: &str) {
    use std::sync::OnceLock;
    static ENABLED: OnceLock<bool> = OnceLock::new();
    let on = *ENABLED.get_or_init(|| {
        std::env::var("FFREQ_DEBUG").map(|v| v == "1").unwrap_or(false)
    });
    if on {
        eprintln!("[worker {}]: {}", rank, msg);
    }
}
