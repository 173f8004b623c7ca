use std::io::Write;

use monitor_core::{AppViewModel, LinkState, NoticeKind, NoticeView, ProgressStatus};

use super::UiSurface;

const BAR_CELLS: usize = 20;

/// Terminal rendition of the page UI: a redrawable status line plus
/// notification lines.
pub struct ConsoleSurface {
    last_link: Option<LinkState>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self { last_link: None }
    }

    fn print_line(&self, line: &str) {
        // Clear the in-place status line before printing a full line.
        print!("\r\x1b[2K");
        println!("{line}");
        let _ = std::io::stdout().flush();
    }

    fn draw_status(&self, progress: Option<&ProgressStatus>, notice: Option<&NoticeView>) {
        print!("\r\x1b[2K{}", status_line(progress, notice));
        let _ = std::io::stdout().flush();
    }
}

fn notice_label(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "ok",
        NoticeKind::Failure => "error",
    }
}

/// Composes the in-place status line: the progress bar, then the newest
/// active notice as a suffix. The suffix disappearing on a later redraw is
/// how a notice's expiry shows up on a plain console.
fn status_line(progress: Option<&ProgressStatus>, notice: Option<&NoticeView>) -> String {
    let mut line = String::new();
    if let Some(progress) = progress {
        let filled = (progress.percent as usize * BAR_CELLS) / 100;
        let bar: String = (0..BAR_CELLS)
            .map(|cell| if cell < filled { '#' } else { '-' })
            .collect();
        line.push_str(&format!("[{bar}] {:>3}%", progress.percent));
        if let Some(message) = &progress.message {
            line.push_str(&format!("  {message}"));
        }
    }
    if let Some(notice) = notice {
        if !line.is_empty() {
            line.push_str("  | ");
        }
        line.push_str(&format!(
            "[{}] {}: {}",
            notice_label(notice.kind),
            notice.title,
            notice.body
        ));
    }
    line
}

impl UiSurface for ConsoleSurface {
    fn report_progress(&mut self, percent: u8, message: Option<&str>) {
        let progress = ProgressStatus {
            percent,
            message: message.map(str::to_string),
        };
        self.draw_status(Some(&progress), None);
    }

    fn notify(&mut self, kind: NoticeKind, title: &str, body: &str) {
        // Scrolling history line on arrival; the active copy also rides
        // the status line until it expires.
        self.print_line(&format!("[{}] {title}: {body}", notice_label(kind)));
    }

    fn reload_view(&mut self) {
        self.print_line("--- view reloaded ---");
        self.last_link = None;
    }

    fn render(&mut self, view: &AppViewModel) {
        if self.last_link != Some(view.link) {
            self.last_link = Some(view.link);
            let status = match view.link {
                LinkState::Disconnected => "channel disconnected",
                LinkState::Connecting => "channel connecting...",
                LinkState::Open => "channel open",
            };
            self.print_line(status);
        }
        self.draw_status(view.progress.as_ref(), view.notices.last());
    }
}
