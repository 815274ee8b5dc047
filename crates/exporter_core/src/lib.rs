//! Exporter core: pure export-session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notice};
pub use msg::{ExportOutcome, Msg};
pub use state::{ExportSession, SessionState, BUSY_LABEL, DEFAULT_TRIGGER_LABEL};
pub use update::update;
pub use view_model::ExportViewModel;
