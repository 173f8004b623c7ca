use std::sync::Once;

use monitor_core::{update, AppState, ChannelEvent, Effect, LinkState, Msg, NoticeKind};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(channel_logging::initialize_for_tests);
}

fn open_state() -> AppState {
    let state = AppState::new();
    let (state, _) = update(state, Msg::ConnectRequested);
    let (state, _) = update(state, Msg::LinkOpened);
    state
}

fn progress(current: f64, total: f64, message: Option<&str>) -> Msg {
    Msg::EventReceived(ChannelEvent::Progress {
        current,
        total,
        message: message.map(ToOwned::to_owned),
    })
}

#[test]
fn progress_event_reports_rounded_percentage() {
    init_logging();
    let state = open_state();

    let (state, effects) = update(state, progress(5.0, 20.0, Some("scanning")));

    assert_eq!(
        effects,
        vec![Effect::ReportProgress {
            percent: 25,
            message: Some("scanning".to_string()),
        }]
    );
    let view = state.view();
    let status = view.progress.expect("progress set");
    assert_eq!(status.percent, 25);
    assert_eq!(status.message.as_deref(), Some("scanning"));
}

#[test]
fn progress_percentage_rounds_to_nearest() {
    init_logging();
    let (_, effects) = update(open_state(), progress(1.0, 3.0, None));
    assert_eq!(
        effects,
        vec![Effect::ReportProgress {
            percent: 33,
            message: None,
        }]
    );

    let (_, effects) = update(open_state(), progress(2.0, 3.0, None));
    assert_eq!(
        effects,
        vec![Effect::ReportProgress {
            percent: 67,
            message: None,
        }]
    );
}

#[test]
fn progress_percentage_is_clamped() {
    init_logging();
    // current beyond total must not exceed 100%.
    let (_, effects) = update(open_state(), progress(30.0, 20.0, None));
    assert_eq!(
        effects,
        vec![Effect::ReportProgress {
            percent: 100,
            message: None,
        }]
    );

    // negative progress clamps to 0%.
    let (_, effects) = update(open_state(), progress(-3.0, 20.0, None));
    assert_eq!(
        effects,
        vec![Effect::ReportProgress {
            percent: 0,
            message: None,
        }]
    );
}

#[test]
fn progress_with_zero_total_reports_zero_percent() {
    init_logging();
    let (_, effects) = update(open_state(), progress(5.0, 0.0, None));
    assert_eq!(
        effects,
        vec![Effect::ReportProgress {
            percent: 0,
            message: None,
        }]
    );

    let (_, effects) = update(open_state(), progress(5.0, -2.0, None));
    assert_eq!(
        effects,
        vec![Effect::ReportProgress {
            percent: 0,
            message: None,
        }]
    );
}

#[test]
fn progress_without_message_keeps_previous_status_line() {
    init_logging();
    let state = open_state();
    let (state, _) = update(state, progress(5.0, 20.0, Some("scanning")));
    let (state, _) = update(state, progress(10.0, 20.0, None));

    let status = state.view().progress.expect("progress set");
    assert_eq!(status.percent, 50);
    assert_eq!(status.message.as_deref(), Some("scanning"));
}

#[test]
fn complete_event_notifies_once_and_reloads() {
    init_logging();
    let state = open_state();

    let (state, effects) = update(
        state,
        Msg::EventReceived(ChannelEvent::Complete { count: 17 }),
    );

    assert_eq!(
        effects,
        vec![
            Effect::Notify {
                kind: NoticeKind::Success,
                title: "Scraping Complete".to_string(),
                body: "Found 17 companies".to_string(),
            },
            Effect::ReloadView,
        ]
    );
    assert!(state.is_reloading());
}

#[test]
fn events_after_completion_are_ignored() {
    init_logging();
    let state = open_state();
    let (state, _) = update(
        state,
        Msg::EventReceived(ChannelEvent::Complete { count: 17 }),
    );

    // The hosting context is being discarded; later frames must do nothing.
    let (state, effects) = update(state.clone(), progress(19.0, 20.0, Some("late")));
    assert!(effects.is_empty());

    let (_, effects) = update(
        state,
        Msg::EventReceived(ChannelEvent::Error {
            message: "late failure".to_string(),
        }),
    );
    assert!(effects.is_empty());
}

#[test]
fn error_event_notifies_and_keeps_link_open() {
    init_logging();
    let state = open_state();

    let (state, effects) = update(
        state,
        Msg::EventReceived(ChannelEvent::Error {
            message: "rate limited".to_string(),
        }),
    );

    assert_eq!(
        effects,
        vec![Effect::Notify {
            kind: NoticeKind::Failure,
            title: "Error".to_string(),
            body: "rate limited".to_string(),
        }]
    );
    assert_eq!(state.link(), LinkState::Open);
    assert!(!state.reconnect_pending());
}
