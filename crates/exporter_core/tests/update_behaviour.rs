use std::sync::Once;

use exporter_core::{
    update, Effect, ExportOutcome, ExportSession, Msg, Notice, SessionState, BUSY_LABEL,
    DEFAULT_TRIGGER_LABEL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(exporter_logging::initialize_for_tests);
}

fn start(session: ExportSession) -> ExportSession {
    let (session, effects) = update(session, Msg::ExportRequested);
    assert_eq!(effects, vec![Effect::RunExport]);
    session
}

#[test]
fn export_request_disables_trigger_and_runs_export() {
    init_logging();
    let session = start(ExportSession::new());
    let view = session.view();

    assert_eq!(view.session, SessionState::Exporting);
    assert!(!view.trigger_enabled);
    assert_eq!(view.trigger_label, BUSY_LABEL);
    assert!(view.dirty);
}

#[test]
fn second_request_while_exporting_is_ignored() {
    init_logging();
    let mut session = start(ExportSession::new());
    assert!(session.consume_dirty());

    let (mut next, effects) = update(session, Msg::ExportRequested);

    assert!(effects.is_empty());
    assert_eq!(next.view().session, SessionState::Exporting);
    assert!(!next.consume_dirty());
}

#[test]
fn success_restores_label_and_notifies() {
    init_logging();
    let session = start(ExportSession::with_label("Save chat"));
    let (session, effects) = update(
        session,
        Msg::ExportFinished(ExportOutcome::Exported {
            documents: 3,
            messages: 12,
        }),
    );

    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::ExportSucceeded { documents: 3 })]
    );
    let view = session.view();
    assert_eq!(view.session, SessionState::Idle);
    assert!(view.trigger_enabled);
    assert_eq!(view.trigger_label, "Save chat");
    assert_eq!(view.last_notice, Some(Notice::ExportSucceeded { documents: 3 }));
}

#[test]
fn empty_outcomes_map_to_their_notices() {
    init_logging();
    for (outcome, notice) in [
        (ExportOutcome::NoMessages, Notice::NoMessagesFound),
        (ExportOutcome::NoValidContent, Notice::NoValidContent),
    ] {
        let session = start(ExportSession::new());
        let (session, effects) = update(session, Msg::ExportFinished(outcome));
        assert_eq!(effects, vec![Effect::Notify(notice.clone())]);
        assert_eq!(session.view().last_notice, Some(notice));
        assert!(session.view().trigger_enabled);
    }
}

#[test]
fn failure_reenables_trigger_and_carries_message() {
    init_logging();
    let session = start(ExportSession::new());
    let (session, effects) = update(
        session,
        Msg::ExportFinished(ExportOutcome::Failed("disk full".to_string())),
    );

    let Effect::Notify(notice) = &effects[0] else {
        panic!("expected a notice, got {effects:?}");
    };
    assert!(notice.is_error());
    assert_eq!(notice.to_string(), "Export failed: disk full");

    let view = session.view();
    assert!(view.trigger_enabled);
    assert_eq!(view.trigger_label, DEFAULT_TRIGGER_LABEL);
}

#[test]
fn stray_finish_without_request_is_ignored() {
    init_logging();
    let (session, effects) = update(
        ExportSession::new(),
        Msg::ExportFinished(ExportOutcome::NoMessages),
    );
    assert!(effects.is_empty());
    assert_eq!(session.view().last_notice, None);
}
