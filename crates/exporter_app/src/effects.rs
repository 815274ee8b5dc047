use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use exporter_core::{Effect, ExportOutcome, Msg, Notice};
use exporter_engine::{
    decode_page, export_conversation, file_timestamp, wait_until_ready, CompiledSelectors,
    DirectorySink, DocumentSink, ExportError, ExportOptions, ExportReport, MemorySink, Readiness,
    ReadinessPolicy,
};
use exporter_logging::{export_debug, export_error, export_info, export_warn};
use scraper::Html;

use crate::config::ExporterConfig;

/// Where finished documents go.
pub enum SinkTarget {
    Directory(PathBuf),
    /// Keep documents in memory only.
    DryRun,
}

/// Executes the effects requested by the session state machine.
pub struct EffectRunner {
    input: PathBuf,
    options: ExportOptions,
    target: SinkTarget,
    readiness: Option<ReadinessPolicy>,
    last_report: Option<ExportReport>,
}

impl EffectRunner {
    pub fn new(input: PathBuf, config: &ExporterConfig, target: SinkTarget, wait: bool) -> Self {
        let options = ExportOptions {
            mode: config.mode,
            selectors: config.selectors.clone(),
            file_name_max_length: config.file_name_max_length,
            timestamp: Arc::new(|| file_timestamp(Utc::now())),
        };
        Self {
            input,
            options,
            target,
            readiness: wait.then(|| config.readiness.policy()),
            last_report: None,
        }
    }

    /// Run `effects` in order; returns the messages they produce.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                Effect::RunExport => {
                    let outcome = self.run_export();
                    replies.push(Msg::ExportFinished(outcome));
                }
                Effect::Notify(notice) => self.notify(notice),
            }
        }
        replies
    }

    pub fn last_report(&self) -> Option<&ExportReport> {
        self.last_report.as_ref()
    }

    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            export_error!("{}", notice);
        } else {
            export_info!("{}", notice);
        }
    }

    fn run_export(&mut self) -> ExportOutcome {
        if let Some(policy) = self.readiness {
            self.wait_for_page(&policy);
        }
        match self.export_once() {
            Ok(report) => {
                let outcome = ExportOutcome::Exported {
                    documents: report.documents.len(),
                    messages: report.message_count,
                };
                self.last_report = Some(report);
                outcome
            }
            Err(err) => match err.downcast_ref::<ExportError>() {
                Some(ExportError::EmptySource) => ExportOutcome::NoMessages,
                Some(ExportError::EmptyContent) => ExportOutcome::NoValidContent,
                _ => ExportOutcome::Failed(format!("{err:#}")),
            },
        }
    }

    fn export_once(&mut self) -> Result<ExportReport> {
        let document = load_page(&self.input)?;
        let report = match &self.target {
            SinkTarget::Directory(dir) => {
                let mut sink = DirectorySink::new(dir.clone());
                export_with(&document, &self.options, &mut sink)?
            }
            SinkTarget::DryRun => {
                let mut sink = MemorySink::new();
                let report = export_with(&document, &self.options, &mut sink)?;
                for record in &sink.records {
                    export_info!("[dry run] {} ({} bytes)", record.file_name, record.content.len());
                }
                report
            }
        };
        Ok(report)
    }

    fn wait_for_page(&self, policy: &ReadinessPolicy) {
        let selectors = match CompiledSelectors::compile(&self.options.selectors) {
            Ok(selectors) => selectors,
            // The export itself reports the bad selector.
            Err(_) => return,
        };
        let container = self.options.selectors.container.clone();
        let outcome = wait_until_ready(
            || page_shows_conversation(&self.input, &selectors),
            policy,
        );
        match outcome {
            Readiness::Ready { waited } => {
                export_debug!("page ready after {:?}", waited)
            }
            Readiness::TimedOut { waited } => export_warn!(
                "{} not found in {} after {:?}; exporting anyway",
                container,
                self.input.display(),
                waited
            ),
        }
    }
}

fn export_with(
    document: &Html,
    options: &ExportOptions,
    sink: &mut dyn DocumentSink,
) -> Result<ExportReport> {
    Ok(export_conversation(document, options, sink)?)
}

fn load_page(path: &Path) -> Result<Html> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let decoded = decode_page(&bytes).with_context(|| format!("Failed to decode {}", path.display()))?;
    export_debug!(
        "decoded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        decoded.encoding_label
    );
    Ok(Html::parse_document(&decoded.html))
}

fn page_shows_conversation(path: &Path, selectors: &CompiledSelectors) -> bool {
    load_page(path)
        .map(|document| exporter_engine::conversation_entries(&document, selectors).is_some())
        .unwrap_or(false)
}
