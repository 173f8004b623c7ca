use crate::{LinkState, NoticeKind, ProgressStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub link: LinkState,
    pub progress: Option<ProgressStatus>,
    pub notices: Vec<NoticeView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}
