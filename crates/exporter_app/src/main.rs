mod cli;
mod config;
mod effects;

use std::collections::VecDeque;

use anyhow::{bail, Result};
use clap::Parser;
use exporter_core::{update, ExportSession, Msg};
use exporter_logging::{export_debug, export_info, LogDestination};

use crate::cli::Cli;
use crate::effects::{EffectRunner, SinkTarget};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }

    let destination = match config.log_file.as_deref() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    exporter_logging::initialize(destination, cli.log_level());
    export_debug!("effective config: {:?}", config);

    let target = if cli.dry_run {
        SinkTarget::DryRun
    } else {
        SinkTarget::Directory(config.output_dir.clone())
    };
    let mut runner = EffectRunner::new(cli.input.clone(), &config, target, cli.wait);

    let session = drive(ExportSession::new(), &mut runner, Msg::ExportRequested);
    let view = session.view();
    export_debug!("session finished: {:?}", view);

    if cli.json {
        if let Some(report) = runner.last_report() {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }

    if let Some(notice) = view.last_notice.filter(|n| n.is_error()) {
        bail!("{notice}");
    }
    if let Some(report) = runner.last_report() {
        for doc in &report.documents {
            export_info!("  {} ({} messages)", doc.file_name, doc.message_count);
        }
    }
    Ok(())
}

/// Feed `first` into the session and keep running effects until no
/// message is left.
fn drive(mut session: ExportSession, runner: &mut EffectRunner, first: Msg) -> ExportSession {
    let mut inbox = VecDeque::from([first]);
    while let Some(msg) = inbox.pop_front() {
        let (next, effects) = update(session, msg);
        session = next;
        if session.consume_dirty() {
            export_debug!("trigger: {}", session.view().trigger_label);
        }
        inbox.extend(runner.run(effects));
    }
    session
}
