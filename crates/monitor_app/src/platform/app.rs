use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use monitor_core::{update, AppState, Msg, TICK_INTERVAL};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::ConsoleSurface;

/// Origin of the scraper web app this monitor attaches to.
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:5000";

pub fn run_app(origin: &str) -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let quit = Arc::new(AtomicBool::new(false));
    spawn_console_input(msg_tx.clone(), quit.clone());

    let mut runner = EffectRunner::new(origin, ConsoleSurface::new(), msg_tx.clone());
    let mut state = AppState::new();

    let saved = runner.saved_fields();
    dispatch(&mut state, &mut runner, Msg::RestoreFields(saved));
    dispatch(&mut state, &mut runner, Msg::ConnectRequested);

    // Single dispatch context: channel events, console input, timers and
    // ticks all funnel through this loop, one update at a time.
    while !quit.load(Ordering::Relaxed) {
        for msg in runner.poll_link() {
            dispatch(&mut state, &mut runner, msg);
        }
        while let Ok(msg) = msg_rx.try_recv() {
            dispatch(&mut state, &mut runner, msg);
        }
        dispatch(&mut state, &mut runner, Msg::Tick);

        if state.consume_dirty() {
            let view = state.view();
            runner.render(&view);
        }
        thread::sleep(TICK_INTERVAL);
    }

    runner.shutdown();
    Ok(())
}

fn dispatch(state: &mut AppState, runner: &mut EffectRunner<ConsoleSurface>, msg: Msg) {
    let current = std::mem::take(state);
    let (next, effects) = update(current, msg);
    *state = next;
    runner.run(effects);
}

fn spawn_console_input(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Some(ConsoleInput::Core(msg)) => {
                    let _ = msg_tx.send(msg);
                }
                Some(ConsoleInput::Quit) => break,
                None => {}
            }
        }
        // EOF or quit: tear down the hosting context. This is the only way
        // the reconnect cycle ever stops.
        quit.store(true, Ordering::Relaxed);
    });
}

enum ConsoleInput {
    Core(Msg),
    Quit,
}

/// `name=value` edits a form field, `submit` submits the form,
/// `quit`/`exit` leaves.
fn parse_line(line: &str) -> Option<ConsoleInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line {
        "quit" | "exit" => Some(ConsoleInput::Quit),
        "submit" => Some(ConsoleInput::Core(Msg::SubmitRequested)),
        _ => line.split_once('=').map(|(name, value)| {
            ConsoleInput::Core(Msg::FieldEdited {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_edits() {
        match parse_line("keywords = fintech stockholm") {
            Some(ConsoleInput::Core(Msg::FieldEdited { name, value })) => {
                assert_eq!(name, "keywords");
                assert_eq!(value, "fintech stockholm");
            }
            _ => panic!("expected field edit"),
        }
    }

    #[test]
    fn parses_submit_and_quit() {
        assert!(matches!(
            parse_line("submit"),
            Some(ConsoleInput::Core(Msg::SubmitRequested))
        ));
        assert!(matches!(parse_line("quit"), Some(ConsoleInput::Quit)));
        assert!(matches!(parse_line("  exit  "), Some(ConsoleInput::Quit)));
    }

    #[test]
    fn ignores_noise() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("no equals sign").is_none());
    }
}
