mod console;

pub use console::ConsoleSurface;

use monitor_core::{AppViewModel, NoticeKind};

/// The UI capabilities the core's effects are executed against.
pub trait UiSurface {
    /// Update the progress indicator and, when present, the status line.
    fn report_progress(&mut self, percent: u8, message: Option<&str>);
    /// Raise a user-visible notification.
    fn notify(&mut self, kind: NoticeKind, title: &str, body: &str);
    /// Discard and rebuild the hosting view.
    fn reload_view(&mut self);
    /// Redraw from the view model after a dirty update.
    fn render(&mut self, view: &AppViewModel);
}
