use exporter_logging::{export_debug, export_trace};
use scraper::{CaseSensitivity, ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::extract::Extractor;
use crate::types::Message;

pub const DEFAULT_USER_NAME: &str = "User";
pub const DEFAULT_ASSISTANT_NAME: &str = "Assistant";

/// CSS hooks describing where the host page renders its conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSelectors {
    pub container: String,
    pub entry: String,
    pub name_label: String,
    pub content: String,
    /// Class marking entries that are not part of the dialog.
    pub system_class: String,
    /// Class marking entries written by the human participant.
    pub user_class: String,
}

impl Default for HostSelectors {
    fn default() -> Self {
        Self {
            container: "#chat".to_string(),
            entry: ".mes".to_string(),
            name_label: ".name_text".to_string(),
            content: ".mes_text".to_string(),
            system_class: "is_system".to_string(),
            user_class: "is_user".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid selector `{selector}`: {message}")]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

#[derive(Debug)]
pub struct CompiledSelectors {
    container: Selector,
    entry: Selector,
    name_label: Selector,
    content: Selector,
    system_class: String,
    user_class: String,
}

impl CompiledSelectors {
    pub fn compile(selectors: &HostSelectors) -> Result<Self, SelectorError> {
        Ok(Self {
            container: parse_selector(&selectors.container)?,
            entry: parse_selector(&selectors.entry)?,
            name_label: parse_selector(&selectors.name_label)?,
            content: parse_selector(&selectors.content)?,
            system_class: selectors.system_class.clone(),
            user_class: selectors.user_class.clone(),
        })
    }
}

fn parse_selector(raw: &str) -> Result<Selector, SelectorError> {
    Selector::parse(raw).map_err(|err| SelectorError {
        selector: raw.to_string(),
        message: err.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRole {
    System,
    User,
    Other,
}

/// One rendered turn as found in the host container.
#[derive(Debug, Clone)]
pub struct ConversationEntry<'a> {
    pub ordinal: usize,
    pub role: EntryRole,
    pub name_label: Option<String>,
    pub content: Option<ElementRef<'a>>,
}

impl ConversationEntry<'_> {
    /// Display name: the label when it has text, otherwise a role default.
    pub fn speaker(&self) -> String {
        match self.name_label.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ if self.role == EntryRole::User => DEFAULT_USER_NAME.to_string(),
            _ => DEFAULT_ASSISTANT_NAME.to_string(),
        }
    }
}

/// Entries of the conversation container in document order, or `None` when
/// the page has no container.
pub fn conversation_entries<'a>(
    document: &'a Html,
    selectors: &CompiledSelectors,
) -> Option<Vec<ConversationEntry<'a>>> {
    let container = document.select(&selectors.container).next()?;
    let entries = container
        .select(&selectors.entry)
        .enumerate()
        .map(|(ordinal, entry)| read_entry(ordinal, entry, selectors))
        .collect();
    Some(entries)
}

fn read_entry<'a>(
    ordinal: usize,
    entry: ElementRef<'a>,
    selectors: &CompiledSelectors,
) -> ConversationEntry<'a> {
    let element = entry.value();
    let role = if element.has_class(&selectors.system_class, CaseSensitivity::CaseSensitive) {
        EntryRole::System
    } else if element.has_class(&selectors.user_class, CaseSensitivity::CaseSensitive) {
        EntryRole::User
    } else {
        EntryRole::Other
    };
    let name_label = entry
        .select(&selectors.name_label)
        .next()
        .map(|label| label.text().collect::<String>());
    let content = entry.select(&selectors.content).next();
    ConversationEntry {
        ordinal,
        role,
        name_label,
        content,
    }
}

/// Result of walking the container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub container_found: bool,
    /// Non-system entries seen, whether or not they had content.
    pub eligible_entries: usize,
    pub messages: Vec<Message>,
}

/// Collect every non-system entry with content, in traversal order.
pub fn collect_messages(
    document: &Html,
    selectors: &CompiledSelectors,
    extractor: &dyn Extractor,
) -> Collected {
    let Some(entries) = conversation_entries(document, selectors) else {
        export_debug!("conversation container not found");
        return Collected::default();
    };

    let mut collected = Collected {
        container_found: true,
        ..Collected::default()
    };
    for entry in entries {
        if entry.role == EntryRole::System {
            export_trace!("skipping system entry #{}", entry.ordinal);
            continue;
        }
        collected.eligible_entries += 1;
        let speaker = entry.speaker();
        match extractor.extract(entry.content) {
            Some(content) => collected.messages.push(Message {
                speaker,
                content,
                ordinal: entry.ordinal,
            }),
            None => export_debug!("dropping empty entry #{} from {}", entry.ordinal, speaker),
        }
    }
    collected
}
