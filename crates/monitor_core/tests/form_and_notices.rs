use std::sync::Once;

use monitor_core::{
    update, AppState, ChannelEvent, Effect, Msg, NoticeKind, SavedField, NOTICE_TTL,
    TICK_INTERVAL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(channel_logging::initialize_for_tests);
}

fn edit(state: AppState, name: &str, value: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FieldEdited {
            name: name.to_string(),
            value: value.to_string(),
        },
    )
}

fn filled_state() -> AppState {
    let state = AppState::new();
    let (state, _) = edit(state, "keywords", "fintech stockholm");
    let (state, _) = edit(state, "max_results", "25");
    let (state, _) = edit(state, "sleep_time", "1.5");
    state
}

#[test]
fn valid_submission_forwards_request() {
    init_logging();
    let (_, effects) = update(filled_state(), Msg::SubmitRequested);

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::ForwardSubmit { request } => {
            assert_eq!(request.keywords, "fintech stockholm");
            assert_eq!(request.max_results, 25);
            assert_eq!(request.sleep_time, 1.5);
        }
        other => panic!("expected ForwardSubmit, got {other:?}"),
    }
}

#[test]
fn submission_collects_all_violations() {
    init_logging();
    let state = AppState::new();
    let (state, _) = edit(state, "keywords", "   ");
    let (state, _) = edit(state, "max_results", "80");
    let (state, _) = edit(state, "sleep_time", "0.1");

    let (state, effects) = update(state, Msg::SubmitRequested);

    let body = "Keywords are required\n\
                Max results must be between 1 and 50\n\
                Sleep time must be between 0.5 and 10 seconds";
    assert_eq!(
        effects,
        vec![Effect::Notify {
            kind: NoticeKind::Failure,
            title: "Validation Error".to_string(),
            body: body.to_string(),
        }]
    );
    assert_eq!(state.view().notices.len(), 1);
}

#[test]
fn unparseable_numbers_fail_validation() {
    init_logging();
    let state = filled_state();
    let (state, _) = edit(state, "max_results", "many");

    let (_, effects) = update(state, Msg::SubmitRequested);
    match &effects[0] {
        Effect::Notify { body, .. } => {
            assert!(body.contains("Max results must be between 1 and 50"));
        }
        other => panic!("expected Notify, got {other:?}"),
    }
}

#[test]
fn field_edit_persists_value() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = edit(state, "keywords", "medtech");

    assert_eq!(
        effects,
        vec![Effect::PersistField {
            name: "keywords".to_string(),
            value: "medtech".to_string(),
        }]
    );
    assert_eq!(state.field("keywords"), Some("medtech"));
}

#[test]
fn restore_only_fills_untouched_fields() {
    init_logging();
    let state = AppState::new();
    let (state, _) = edit(state, "keywords", "typed by user");

    let saved = vec![
        SavedField {
            name: "keywords".to_string(),
            value: "stale autosave".to_string(),
        },
        SavedField {
            name: "max_results".to_string(),
            value: "10".to_string(),
        },
    ];
    let (state, effects) = update(state, Msg::RestoreFields(saved));

    assert!(effects.is_empty());
    assert_eq!(state.field("keywords"), Some("typed by user"));
    assert_eq!(state.field("max_results"), Some("10"));
}

#[test]
fn notifications_expire_after_ttl() {
    init_logging();
    let state = AppState::new();
    let (mut state, _) = update(
        state,
        Msg::EventReceived(ChannelEvent::Error {
            message: "boom".to_string(),
        }),
    );
    assert_eq!(state.view().notices.len(), 1);
    assert!(state.consume_dirty());

    // One tick short of the dismissal window: still visible.
    let ticks_to_expiry = NOTICE_TTL.as_millis().div_ceil(TICK_INTERVAL.as_millis());
    for _ in 0..ticks_to_expiry - 1 {
        let (next, effects) = update(state, Msg::Tick);
        assert!(effects.is_empty());
        state = next;
    }
    assert_eq!(state.view().notices.len(), 1);

    let (state, _) = update(state, Msg::Tick);
    assert!(state.view().notices.is_empty());
}
