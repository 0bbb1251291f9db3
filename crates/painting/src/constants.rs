use std::time::Duration;

/// Delay between pointer release and compositing the finished stroke,
/// letting a trailing move/up pair settle first (about one frame).
pub const COMMIT_DELAY: Duration = Duration::from_millis(16);
