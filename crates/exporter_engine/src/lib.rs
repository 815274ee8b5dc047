//! Exporter engine: conversation extraction, sanitization and document output.
mod collect;
mod decode;
mod export;
mod extract;
mod filename;
mod filter;
mod ready;
mod render;
mod segregate;
mod sink;
mod types;

pub use collect::{
    collect_messages, conversation_entries, Collected, CompiledSelectors, ConversationEntry,
    EntryRole, HostSelectors, SelectorError, DEFAULT_ASSISTANT_NAME, DEFAULT_USER_NAME,
};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use export::{build_manifest, export_conversation, export_page, ExportError, ExportOptions};
pub use extract::{decode_entities, markup_content, plain_text, ContentMode, Extractor, MessageExtractor};
pub use filename::{file_timestamp, safe_label, FileNamer, DEFAULT_MAX_LABEL_LEN};
pub use filter::{filter_markup, filter_subtree, FilteredFragment, EXCLUDED_SELECTORS};
pub use ready::{wait_until_ready, Readiness, ReadinessPolicy};
pub use render::{combined_body, escape_text, role_body, wrap_document};
pub use segregate::{segregate_by_role, RoleGroup, Segregated};
pub use sink::{
    ensure_output_dir, DirectorySink, DocumentSink, MemorySink, SinkError, SinkRecord, HTML_MIME,
};
pub use types::{Document, DocumentKind, ExportManifest, ExportReport, ExportedDocument, Message};
