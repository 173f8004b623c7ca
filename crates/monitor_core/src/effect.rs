use std::time::Duration;

use crate::{NoticeKind, ScrapeRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Open the progress channel to the derived endpoint.
    OpenChannel,
    /// Arm the one-shot reconnect timer. At most one is ever pending.
    ScheduleReconnect { delay: Duration },
    /// Push the progress indicator to the UI surface.
    ReportProgress {
        percent: u8,
        message: Option<String>,
    },
    /// Raise a user-visible notification.
    Notify {
        kind: NoticeKind,
        title: String,
        body: String,
    },
    /// Discard and rebuild the hosting view.
    ReloadView,
    /// Autosave an edited form field.
    PersistField { name: String, value: String },
    /// Hand a validated scrape request to the submission seam.
    ForwardSubmit { request: ScrapeRequest },
}
