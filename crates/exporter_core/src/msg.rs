#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User activated the export trigger.
    ExportRequested,
    /// The pipeline run started by `Effect::RunExport` is over.
    ExportFinished(ExportOutcome),
    /// UI/render tick to coalesce rendering.
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    NoMessages,
    NoValidContent,
    Exported { documents: usize, messages: usize },
    Failed(String),
}
