use serde::Serialize;

/// One collected conversation turn.
///
/// `ordinal` is the entry's traversal index in the host container and is the
/// only ordering key downstream stages may rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub speaker: String,
    pub content: String,
    pub ordinal: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentKind {
    /// Messages of a single speaker.
    Role { speaker: String },
    /// Every message in traversal order, labeled by speaker.
    Combined { first: String, second: String },
}

/// One output artifact before it is wrapped into a standalone page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub kind: DocumentKind,
    pub title: String,
    pub body_fragment: String,
    pub message_count: usize,
}

/// Every document produced by one export run: per-role documents in
/// first-occurrence order, followed by the combined document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportManifest {
    pub documents: Vec<Document>,
}

impl ExportManifest {
    pub fn role_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents
            .iter()
            .filter(|doc| matches!(doc.kind, DocumentKind::Role { .. }))
    }

    pub fn combined(&self) -> Option<&Document> {
        self.documents
            .iter()
            .find(|doc| matches!(doc.kind, DocumentKind::Combined { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedDocument {
    pub file_name: String,
    pub title: String,
    #[serde(flatten)]
    pub kind: DocumentKind,
    pub message_count: usize,
}

/// Summary of a completed export, in hand-off order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub timestamp: String,
    pub speakers: Vec<String>,
    pub message_count: usize,
    pub documents: Vec<ExportedDocument>,
}
