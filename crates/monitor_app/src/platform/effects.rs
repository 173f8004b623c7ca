use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use channel_logging::{channel_error, channel_info, channel_warn};
use monitor_channel::{channel_endpoint, ChannelHandle, LinkEvent, WireEvent};
use monitor_core::{AppViewModel, ChannelEvent, Effect, Msg, SavedField};
use url::Url;

use super::persistence;
use super::ui::UiSurface;

/// Executes core effects and feeds channel activity back as messages.
pub struct EffectRunner<U: UiSurface> {
    channel: ChannelHandle,
    endpoint: Option<Url>,
    ui: U,
    form_dir: PathBuf,
    fields: BTreeMap<String, String>,
    msg_tx: mpsc::Sender<Msg>,
}

impl<U: UiSurface> EffectRunner<U> {
    pub fn new(origin: &str, ui: U, msg_tx: mpsc::Sender<Msg>) -> Self {
        let endpoint = match channel_endpoint(origin) {
            Ok(endpoint) => Some(endpoint),
            Err(err) => {
                // Unsupported transport is a silent no-op for the user;
                // only the operator log hears about it.
                channel_warn!("progress channel unavailable for {}: {}", origin, err);
                None
            }
        };
        let form_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let fields = persistence::load_saved_fields(&form_dir)
            .into_iter()
            .map(|field| (field.name, field.value))
            .collect();

        Self {
            channel: ChannelHandle::new(),
            endpoint,
            ui,
            form_dir,
            fields,
            msg_tx,
        }
    }

    pub fn saved_fields(&self) -> Vec<SavedField> {
        self.fields
            .iter()
            .map(|(name, value)| SavedField {
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenChannel => self.open_channel(),
                Effect::ScheduleReconnect { delay } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = msg_tx.send(Msg::ReconnectDue);
                    });
                }
                Effect::ReportProgress { percent, message } => {
                    self.ui.report_progress(percent, message.as_deref());
                }
                Effect::Notify { kind, title, body } => {
                    self.ui.notify(kind, &title, &body);
                }
                Effect::ReloadView => {
                    // The discarded view takes its socket with it; the
                    // rebuilt one opens a fresh link of its own.
                    self.channel.close();
                    self.ui.reload_view();
                    let _ = self.msg_tx.send(Msg::ViewReloaded);
                    // The rebuilt view restores autosaved fields, as the
                    // original page did on load.
                    let _ = self.msg_tx.send(Msg::RestoreFields(self.saved_fields()));
                }
                Effect::PersistField { name, value } => {
                    self.fields.insert(name, value);
                    persistence::save_fields(&self.form_dir, &self.fields);
                }
                Effect::ForwardSubmit { request } => {
                    // The submission endpoint lives outside this process;
                    // hand-off is the seam.
                    channel_info!(
                        "scrape request accepted: keywords=\"{}\" max_results={} sleep_time={}",
                        request.keywords,
                        request.max_results,
                        request.sleep_time
                    );
                }
            }
        }
    }

    /// Drains pending link events into core messages. Frames that carry
    /// nothing for the core (malformed, unknown tag) are logged here.
    pub fn poll_link(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.channel.try_recv() {
            match event {
                LinkEvent::Opened => msgs.push(Msg::LinkOpened),
                LinkEvent::Event(wire) => match wire_to_event(wire) {
                    WireMapping::Core(event) => msgs.push(Msg::EventReceived(event)),
                    WireMapping::Unknown { kind } => {
                        channel_warn!("unknown channel event type: {}", kind);
                    }
                },
                LinkEvent::FrameRejected { detail } => {
                    channel_warn!("dropping malformed channel frame: {}", detail);
                }
                LinkEvent::Errored { detail } => {
                    channel_error!("progress channel error: {}", detail);
                    msgs.push(Msg::LinkErrored { detail });
                }
                LinkEvent::Closed { reason } => msgs.push(Msg::LinkClosed { reason }),
            }
        }
        msgs
    }

    pub fn render(&mut self, view: &AppViewModel) {
        self.ui.render(view);
    }

    pub fn shutdown(&self) {
        self.channel.shutdown();
    }

    fn open_channel(&self) {
        if let Some(endpoint) = &self.endpoint {
            self.channel.open(endpoint.clone());
        }
    }
}

enum WireMapping {
    Core(ChannelEvent),
    Unknown { kind: String },
}

fn wire_to_event(event: WireEvent) -> WireMapping {
    match event {
        WireEvent::Progress {
            current,
            total,
            message,
        } => WireMapping::Core(ChannelEvent::Progress {
            current,
            total,
            message,
        }),
        WireEvent::Complete { count } => WireMapping::Core(ChannelEvent::Complete { count }),
        WireEvent::ServerError { message } => WireMapping::Core(ChannelEvent::Error { message }),
        WireEvent::Unknown { kind } => WireMapping::Unknown { kind },
    }
}
