use crate::view_model::ExportViewModel;
use crate::Notice;

pub const DEFAULT_TRIGGER_LABEL: &str = "Export conversation as HTML";
pub const BUSY_LABEL: &str = "Processing…";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Exporting,
}

/// Trigger state that the host UI used to keep on its button: whether an
/// export is in flight and the label to restore afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSession {
    session: SessionState,
    trigger_label: String,
    cached_label: Option<String>,
    last_notice: Option<Notice>,
    dirty: bool,
}

impl Default for ExportSession {
    fn default() -> Self {
        Self::with_label(DEFAULT_TRIGGER_LABEL)
    }
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            session: SessionState::Idle,
            trigger_label: label.into(),
            cached_label: None,
            last_notice: None,
            dirty: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.session == SessionState::Exporting
    }

    pub fn view(&self) -> ExportViewModel {
        ExportViewModel {
            session: self.session,
            trigger_label: self.trigger_label.clone(),
            trigger_enabled: !self.is_busy(),
            last_notice: self.last_notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_export(&mut self) {
        self.session = SessionState::Exporting;
        self.cached_label = Some(std::mem::replace(
            &mut self.trigger_label,
            BUSY_LABEL.to_string(),
        ));
        self.mark_dirty();
    }

    pub(crate) fn finish_export(&mut self, notice: Notice) {
        self.session = SessionState::Idle;
        if let Some(label) = self.cached_label.take() {
            self.trigger_label = label;
        }
        self.last_notice = Some(notice);
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
