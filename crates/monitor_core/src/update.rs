use crate::{
    AppState, ChannelEvent, Effect, LinkState, Msg, NoticeKind, ScrapeRequest, RECONNECT_DELAY,
    TICK_INTERVAL,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ConnectRequested => {
            if state.link() == LinkState::Disconnected && !state.is_reloading() {
                state.set_link(LinkState::Connecting);
                vec![Effect::OpenChannel]
            } else {
                Vec::new()
            }
        }
        Msg::LinkOpened => {
            state.set_link(LinkState::Open);
            Vec::new()
        }
        Msg::EventReceived(event) => {
            // A pending reload discards the hosting context; nothing after
            // the completion event may touch the UI.
            if state.is_reloading() {
                Vec::new()
            } else {
                dispatch_event(&mut state, event)
            }
        }
        // Transport errors are operator-facing only. Reconnects are driven
        // solely by the close transition, which the channel guarantees
        // follows every error.
        Msg::LinkErrored { .. } => Vec::new(),
        Msg::LinkClosed { .. } => {
            state.set_link(LinkState::Disconnected);
            if state.is_reloading() || state.reconnect_pending() {
                Vec::new()
            } else {
                state.mark_reconnect_pending();
                vec![Effect::ScheduleReconnect {
                    delay: RECONNECT_DELAY,
                }]
            }
        }
        Msg::ReconnectDue => {
            state.clear_reconnect_pending();
            if state.link() == LinkState::Disconnected && !state.is_reloading() {
                state.set_link(LinkState::Connecting);
                vec![Effect::OpenChannel]
            } else {
                Vec::new()
            }
        }
        Msg::ViewReloaded => {
            // Fresh page context: everything transient is gone. The shell
            // re-restores autosaved fields afterwards.
            let mut next = AppState::new();
            next.set_link(LinkState::Connecting);
            state = next;
            vec![Effect::OpenChannel]
        }
        Msg::FieldEdited { name, value } => {
            state.set_field(&name, &value);
            vec![Effect::PersistField { name, value }]
        }
        Msg::RestoreFields(saved) => {
            // Saved values only pre-fill fields the user has not typed into.
            for field in saved {
                let untouched = state
                    .field(&field.name)
                    .map(|value| value.is_empty())
                    .unwrap_or(true);
                if untouched && !field.value.is_empty() {
                    state.set_field(&field.name, &field.value);
                }
            }
            Vec::new()
        }
        Msg::SubmitRequested => match ScrapeRequest::from_fields(state.fields()) {
            Ok(request) => vec![Effect::ForwardSubmit { request }],
            Err(violations) => {
                let body = violations.join("\n");
                state.push_notification(NoticeKind::Failure, "Validation Error", &body);
                vec![Effect::Notify {
                    kind: NoticeKind::Failure,
                    title: "Validation Error".to_string(),
                    body,
                }]
            }
        },
        Msg::Tick => {
            state.age_notifications(TICK_INTERVAL);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn dispatch_event(state: &mut AppState, event: ChannelEvent) -> Vec<Effect> {
    match event {
        ChannelEvent::Progress {
            current,
            total,
            message,
        } => {
            let percent = progress_percent(current, total);
            state.set_progress(percent, message.clone());
            vec![Effect::ReportProgress { percent, message }]
        }
        ChannelEvent::Complete { count } => {
            state.begin_reload();
            let body = format!("Found {count} companies");
            state.push_notification(NoticeKind::Success, "Scraping Complete", &body);
            vec![
                Effect::Notify {
                    kind: NoticeKind::Success,
                    title: "Scraping Complete".to_string(),
                    body,
                },
                Effect::ReloadView,
            ]
        }
        ChannelEvent::Error { message } => {
            state.push_notification(NoticeKind::Failure, "Error", &message);
            vec![Effect::Notify {
                kind: NoticeKind::Failure,
                title: "Error".to_string(),
                body: message,
            }]
        }
    }
}

/// `round(current/total*100)` clamped to [0, 100].
///
/// A `total` of zero (or anything non-finite) reports 0% instead of
/// propagating the undefined division.
fn progress_percent(current: f64, total: f64) -> u8 {
    if !current.is_finite() || !total.is_finite() || total <= 0.0 {
        return 0;
    }
    let ratio = (current / total) * 100.0;
    ratio.round().clamp(0.0, 100.0) as u8
}
