/// A decoded server-pushed event, already stripped of wire concerns.
///
/// Unknown discriminators and malformed frames never reach the core; the
/// shell logs and drops them at the channel boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// Incremental progress for the running scrape job.
    Progress {
        current: f64,
        total: f64,
        message: Option<String>,
    },
    /// The scrape job finished; `count` results were collected.
    Complete { count: u64 },
    /// A job-level failure reported by the server. The link stays open.
    Error { message: String },
}
