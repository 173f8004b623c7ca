use std::collections::BTreeMap;
use std::time::Duration;

use crate::view_model::{AppViewModel, NoticeView};

/// Fixed delay between a channel closure and the next connect attempt.
/// Flat on purpose: no backoff, no cap, no jitter.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// How long a notification stays visible before auto-dismissing.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Cadence at which the shell sends `Msg::Tick`.
pub const TICK_INTERVAL: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Disconnected,
    Connecting,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
    pub remaining: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressStatus {
    pub percent: u8,
    pub message: Option<String>,
}

/// An autosaved form field, as restored from persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    link: LinkState,
    reconnect_pending: bool,
    reloading: bool,
    progress: Option<ProgressStatus>,
    notifications: Vec<Notification>,
    fields: BTreeMap<String, String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            link: self.link,
            progress: self.progress.clone(),
            notices: self
                .notifications
                .iter()
                .map(|notice| NoticeView {
                    kind: notice.kind,
                    title: notice.title.clone(),
                    body: notice.body.clone(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn link(&self) -> LinkState {
        self.link
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn reconnect_pending(&self) -> bool {
        self.reconnect_pending
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn set_link(&mut self, link: LinkState) {
        if self.link != link {
            self.link = link;
            self.dirty = true;
        }
    }

    pub(crate) fn mark_reconnect_pending(&mut self) {
        self.reconnect_pending = true;
    }

    pub(crate) fn clear_reconnect_pending(&mut self) {
        self.reconnect_pending = false;
    }

    pub(crate) fn begin_reload(&mut self) {
        self.reloading = true;
        self.dirty = true;
    }

    pub(crate) fn set_progress(&mut self, percent: u8, message: Option<String>) {
        let status = ProgressStatus {
            percent,
            // A progress event without a message keeps the previous status line.
            message: message.or_else(|| {
                self.progress
                    .as_ref()
                    .and_then(|status| status.message.clone())
            }),
        };
        if self.progress.as_ref() != Some(&status) {
            self.progress = Some(status);
            self.dirty = true;
        }
    }

    pub(crate) fn push_notification(&mut self, kind: NoticeKind, title: &str, body: &str) {
        self.notifications.push(Notification {
            kind,
            title: title.to_string(),
            body: body.to_string(),
            remaining: NOTICE_TTL,
        });
        self.dirty = true;
    }

    /// Ages notifications by `elapsed` and drops the expired ones.
    pub(crate) fn age_notifications(&mut self, elapsed: Duration) {
        if self.notifications.is_empty() {
            return;
        }
        for notice in &mut self.notifications {
            notice.remaining = notice.remaining.saturating_sub(elapsed);
        }
        let before = self.notifications.len();
        self.notifications
            .retain(|notice| !notice.remaining.is_zero());
        if self.notifications.len() != before {
            self.dirty = true;
        }
    }

    pub(crate) fn set_field(&mut self, name: &str, value: &str) {
        if self.fields.get(name).map(String::as_str) != Some(value) {
            self.fields.insert(name.to_string(), value.to_string());
            self.dirty = true;
        }
    }
}
