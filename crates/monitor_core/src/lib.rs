//! Monitor core: pure state machine for the scraping-progress channel.
mod effect;
mod event;
mod msg;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use event::ChannelEvent;
pub use msg::Msg;
pub use request::{
    ScrapeRequest, FIELD_KEYWORDS, FIELD_MAX_RESULTS, FIELD_SLEEP_TIME, MAX_RESULTS_MAX,
    MAX_RESULTS_MIN, SLEEP_TIME_MAX, SLEEP_TIME_MIN,
};
pub use state::{
    AppState, LinkState, Notification, NoticeKind, ProgressStatus, SavedField, NOTICE_TTL,
    RECONNECT_DELAY, TICK_INTERVAL,
};
pub use update::update;
pub use view_model::{AppViewModel, NoticeView};
