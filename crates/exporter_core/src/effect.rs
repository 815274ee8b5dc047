use std::fmt;

use crate::ExportOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the extraction pipeline once and report back with `Msg::ExportFinished`.
    RunExport,
    /// Show a notice on the diagnostic surface.
    Notify(Notice),
}

/// The user-visible outcomes of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoMessagesFound,
    NoValidContent,
    ExportSucceeded { documents: usize },
    ExportFailed { message: String },
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::ExportFailed { .. })
    }
}

impl From<ExportOutcome> for Notice {
    fn from(outcome: ExportOutcome) -> Self {
        match outcome {
            ExportOutcome::NoMessages => Notice::NoMessagesFound,
            ExportOutcome::NoValidContent => Notice::NoValidContent,
            ExportOutcome::Exported { documents, .. } => Notice::ExportSucceeded { documents },
            ExportOutcome::Failed(message) => Notice::ExportFailed { message },
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoMessagesFound => write!(f, "No conversation messages found"),
            Notice::NoValidContent => write!(f, "No valid conversation content found"),
            Notice::ExportSucceeded { documents } => {
                write!(f, "Export complete ({documents} documents)")
            }
            Notice::ExportFailed { message } => write!(f, "Export failed: {message}"),
        }
    }
}
