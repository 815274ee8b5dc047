use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use exporter_logging::{export_debug, export_info};
use scraper::Html;

use crate::collect::{
    collect_messages, CompiledSelectors, HostSelectors, SelectorError, DEFAULT_ASSISTANT_NAME,
    DEFAULT_USER_NAME,
};
use crate::extract::{ContentMode, MessageExtractor};
use crate::filename::{file_timestamp, FileNamer, DEFAULT_MAX_LABEL_LEN};
use crate::render::{combined_body, role_body, wrap_document};
use crate::segregate::{segregate_by_role, Segregated};
use crate::sink::{DocumentSink, SinkError, HTML_MIME};
use crate::types::{Document, DocumentKind, ExportManifest, ExportReport, ExportedDocument};

#[derive(Clone)]
pub struct ExportOptions {
    pub mode: ContentMode,
    pub selectors: HostSelectors,
    pub file_name_max_length: usize,
    /// Produces the timestamp shared by every file name of one run.
    pub timestamp: Arc<dyn Fn() -> String + Send + Sync>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            mode: ContentMode::default(),
            selectors: HostSelectors::default(),
            file_name_max_length: DEFAULT_MAX_LABEL_LEN,
            timestamp: Arc::new(|| file_timestamp(Utc::now())),
        }
    }
}

impl fmt::Debug for ExportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportOptions")
            .field("mode", &self.mode)
            .field("selectors", &self.selectors)
            .field("file_name_max_length", &self.file_name_max_length)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no conversation messages found")]
    EmptySource,
    #[error("no valid conversation content found")]
    EmptyContent,
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error("failed to save {file_name}: {source}")]
    Sink {
        file_name: String,
        #[source]
        source: SinkError,
    },
}

/// Collect, segregate and render the page's conversation without handing
/// anything off.
pub fn build_manifest(
    document: &Html,
    options: &ExportOptions,
) -> Result<ExportManifest, ExportError> {
    let selectors = CompiledSelectors::compile(&options.selectors)?;
    let extractor = MessageExtractor::new(options.mode);

    let collected = collect_messages(document, &selectors, &extractor);
    if !collected.container_found || collected.eligible_entries == 0 {
        return Err(ExportError::EmptySource);
    }
    export_debug!(
        "collected {} of {} eligible entries",
        collected.messages.len(),
        collected.eligible_entries
    );

    let segregated = segregate_by_role(collected.messages);
    if segregated.is_empty() {
        return Err(ExportError::EmptyContent);
    }
    Ok(render_documents(&segregated, options.mode))
}

fn render_documents(segregated: &Segregated, mode: ContentMode) -> ExportManifest {
    let mut documents: Vec<Document> = segregated
        .groups
        .iter()
        .map(|group| Document {
            kind: DocumentKind::Role {
                speaker: group.speaker.clone(),
            },
            title: format!("{} dialog", group.speaker),
            body_fragment: role_body(&group.fragments, mode),
            message_count: group.fragments.len(),
        })
        .collect();

    let mut speakers = segregated.speakers();
    let first = speakers.next().unwrap_or(DEFAULT_USER_NAME).to_string();
    let second = speakers.next().unwrap_or(DEFAULT_ASSISTANT_NAME).to_string();
    documents.push(Document {
        title: format!("{first} & {second} full dialog"),
        body_fragment: combined_body(&segregated.full, mode),
        message_count: segregated.full.len(),
        kind: DocumentKind::Combined { first, second },
    });

    ExportManifest { documents }
}

/// Run one export: build every document, then hand them to `sink` in order
/// (per-speaker documents first, combined last).
///
/// A sink failure stops the run; documents already accepted stay where the
/// sink put them.
pub fn export_conversation(
    document: &Html,
    options: &ExportOptions,
    sink: &mut dyn DocumentSink,
) -> Result<ExportReport, ExportError> {
    let manifest = build_manifest(document, options)?;
    let namer = FileNamer::new((options.timestamp)(), options.file_name_max_length);

    let mut exported = Vec::with_capacity(manifest.documents.len());
    for doc in manifest.documents {
        let file_name = match &doc.kind {
            DocumentKind::Role { speaker } => namer.role_file(speaker),
            DocumentKind::Combined { first, second } => namer.combined_file(first, second),
        };
        let page = wrap_document(&doc.title, &doc.body_fragment);
        sink.accept(&file_name, HTML_MIME, &page)
            .map_err(|source| ExportError::Sink {
                file_name: file_name.clone(),
                source,
            })?;
        exported.push(ExportedDocument {
            file_name,
            title: doc.title,
            kind: doc.kind,
            message_count: doc.message_count,
        });
    }

    let speakers: Vec<String> = exported
        .iter()
        .filter_map(|doc| match &doc.kind {
            DocumentKind::Role { speaker } => Some(speaker.clone()),
            DocumentKind::Combined { .. } => None,
        })
        .collect();
    let message_count = exported
        .last()
        .map(|doc| doc.message_count)
        .unwrap_or_default();
    export_info!(
        "exported {} documents ({} messages, {} speakers)",
        exported.len(),
        message_count,
        speakers.len()
    );

    Ok(ExportReport {
        timestamp: namer.timestamp().to_string(),
        speakers,
        message_count,
        documents: exported,
    })
}

/// Parse `html` as a full page and export it.
pub fn export_page(
    html: &str,
    options: &ExportOptions,
    sink: &mut dyn DocumentSink,
) -> Result<ExportReport, ExportError> {
    let document = Html::parse_document(html);
    export_conversation(&document, options, sink)
}
