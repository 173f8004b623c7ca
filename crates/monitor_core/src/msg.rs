use crate::{ChannelEvent, SavedField};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Initial request to bring the progress channel up.
    ConnectRequested,
    /// The channel handshake completed.
    LinkOpened,
    /// A decoded event arrived on the channel.
    EventReceived(ChannelEvent),
    /// The channel reported a transport error. Close always follows.
    LinkErrored { detail: String },
    /// The channel closed, cleanly or not.
    LinkClosed { reason: Option<String> },
    /// The reconnect timer fired.
    ReconnectDue,
    /// The shell finished discarding and rebuilding the view.
    ViewReloaded,
    /// User edited a form field (debounced text).
    FieldEdited { name: String, value: String },
    /// Restore autosaved form fields from persisted state.
    RestoreFields(Vec<SavedField>),
    /// User submitted the scrape form.
    SubmitRequested,
    /// UI/render tick; also ages notifications.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
