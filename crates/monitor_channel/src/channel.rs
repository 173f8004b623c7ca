use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use channel_logging::{channel_debug, channel_info};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use crate::decode::decode_frame;
use crate::LinkEvent;

type LinkId = u64;

enum ChannelCommand {
    Open { endpoint: Url, link: LinkId },
    Close,
    Shutdown,
}

/// Handle to the channel worker: a dedicated thread owning a tokio runtime.
///
/// At most one link is live at a time. Each `open` supersedes the previous
/// link: its task is aborted (dropping the socket) and any of its events
/// still in flight are discarded on receive, so a stale closure can never
/// masquerade as the current link going down.
///
/// The worker never retries on its own; every connection attempt is an
/// explicit `open`, so the owner stays in charge of the reconnect policy.
pub struct ChannelHandle {
    cmd_tx: mpsc::Sender<ChannelCommand>,
    event_rx: mpsc::Receiver<(LinkId, LinkEvent)>,
    generation: Arc<AtomicU64>,
}

impl ChannelHandle {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<(LinkId, LinkEvent)>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut current: Option<tokio::task::JoinHandle<()>> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ChannelCommand::Open { endpoint, link } => {
                        // Abort the superseded link so its socket drops now
                        // instead of lingering until the server hangs up.
                        if let Some(task) = current.take() {
                            task.abort();
                        }
                        let event_tx = event_tx.clone();
                        current = Some(runtime.spawn(async move {
                            run_link(endpoint, link, event_tx).await;
                        }));
                    }
                    ChannelCommand::Close => {
                        if let Some(task) = current.take() {
                            task.abort();
                        }
                    }
                    ChannelCommand::Shutdown => break,
                }
            }
        });

        Self {
            cmd_tx,
            event_rx,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Requests one connection attempt to `endpoint`, superseding whatever
    /// link came before it.
    pub fn open(&self, endpoint: Url) {
        let link = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.cmd_tx.send(ChannelCommand::Open { endpoint, link });
    }

    /// Tears down the current link, if any. A closed-by-request link never
    /// surfaces another event, closure included.
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.cmd_tx.send(ChannelCommand::Close);
    }

    /// Stops the worker thread. In-flight links are dropped with the runtime.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(ChannelCommand::Shutdown);
    }

    pub fn try_recv(&self) -> Option<LinkEvent> {
        while let Ok((link, event)) = self.event_rx.try_recv() {
            if self.is_current(link) {
                return Some(event);
            }
            // Stale event from a superseded link: drop it.
        }
        None
    }

    /// Blocking receive with a deadline; used by the shell loop and tests.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LinkEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let (link, event) = self.event_rx.recv_timeout(remaining).ok()?;
            if self.is_current(link) {
                return Some(event);
            }
        }
    }

    fn is_current(&self, link: LinkId) -> bool {
        link == self.generation.load(Ordering::SeqCst)
    }
}

impl Default for ChannelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives one socket from handshake to closure.
///
/// Emission contract: `Opened` at most once, then any number of `Event`/
/// `FrameRejected`, and exactly one final `Closed`; an `Errored` is always
/// followed by the `Closed`. A superseded link is aborted mid-stream and
/// its tail of events is filtered out by the handle instead.
async fn run_link(endpoint: Url, link: LinkId, event_tx: mpsc::Sender<(LinkId, LinkEvent)>) {
    let emit = |event: LinkEvent| {
        let _ = event_tx.send((link, event));
    };

    channel_info!("connecting progress channel to {endpoint}");
    let (stream, _response) = match connect_async(endpoint.as_str()).await {
        Ok(pair) => pair,
        Err(err) => {
            emit(LinkEvent::Errored {
                detail: err.to_string(),
            });
            emit(LinkEvent::Closed { reason: None });
            return;
        }
    };

    emit(LinkEvent::Opened);
    let (mut sink, mut source) = stream.split();

    while let Some(frame) = source.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let event = match decode_frame(&text) {
                    Ok(event) => LinkEvent::Event(event),
                    Err(err) => LinkEvent::FrameRejected {
                        detail: err.to_string(),
                    },
                };
                emit(event);
            }
            Ok(Message::Ping(payload)) => {
                let _ = sink.send(Message::Pong(payload)).await;
            }
            Ok(Message::Close(frame)) => {
                let reason = frame
                    .map(|close| close.reason.to_string())
                    .filter(|reason| !reason.is_empty());
                channel_debug!("progress channel closed by server");
                emit(LinkEvent::Closed { reason });
                return;
            }
            // Binary and pong frames carry nothing for us.
            Ok(_) => {}
            Err(err) => {
                emit(LinkEvent::Errored {
                    detail: err.to_string(),
                });
                break;
            }
        }
    }

    emit(LinkEvent::Closed { reason: None });
}
