use crate::{Effect, ExportSession, Msg, Notice};

/// Pure update function: applies a message to the session and returns any effects.
pub fn update(mut session: ExportSession, msg: Msg) -> (ExportSession, Vec<Effect>) {
    let effects = match msg {
        Msg::ExportRequested => {
            // The trigger is disabled while exporting; the pipeline itself is not re-entrant.
            if session.is_busy() {
                return (session, Vec::new());
            }
            session.begin_export();
            vec![Effect::RunExport]
        }
        Msg::ExportFinished(outcome) => {
            if !session.is_busy() {
                return (session, Vec::new());
            }
            let notice = Notice::from(outcome);
            session.finish_export(notice.clone());
            vec![Effect::Notify(notice)]
        }
        Msg::Tick => Vec::new(),
    };

    (session, effects)
}
