use crate::{Notice, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportViewModel {
    pub session: SessionState,
    pub trigger_label: String,
    pub trigger_enabled: bool,
    pub last_notice: Option<Notice>,
    pub dirty: bool,
}
