/// One event as decoded off the wire, keyed by its `type` discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum WireEvent {
    /// `scraping_progress`
    Progress {
        current: f64,
        total: f64,
        message: Option<String>,
    },
    /// `scraping_complete`
    Complete { count: u64 },
    /// `error`
    ServerError { message: String },
    /// Any other discriminator. Carries the tag so the shell can log it.
    Unknown { kind: String },
}

/// Lifecycle and payload events emitted by the channel worker.
///
/// `Errored` is always followed by a `Closed`; consumers drive reconnects
/// off the close alone.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    Opened,
    Event(WireEvent),
    /// A text frame that failed to decode. Logged and dropped downstream.
    FrameRejected { detail: String },
    Errored { detail: String },
    Closed { reason: Option<String> },
}
