#![allow(dead_code)]

use std::sync::Arc;

use exporter_engine::{ContentMode, ExportOptions};

pub const STAMP: &str = "2024-01-01T00-00-00";

/// A host page with the given entries inside the conversation container.
pub fn page(entries: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Chat</title></head><body><div id="extensions_settings"></div><div id="chat">{}</div></body></html>"#,
        entries.join("\n")
    )
}

/// One rendered turn. `name` of `None` leaves the name label out entirely.
pub fn entry(classes: &str, name: Option<&str>, content: &str) -> String {
    let label = name
        .map(|n| format!(r#"<span class="name_text">{n}</span>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="mes {classes}"><div class="avatar"><img src="a.png"></div><div class="mes_block"><div class="ch_name">{label}<small class="timestamp">May 1, 2024</small><div class="mes_buttons"><div class="mes_edit">Edit</div></div></div><div class="mes_text">{content}</div></div></div>"#
    )
}

pub fn options(mode: ContentMode) -> ExportOptions {
    ExportOptions {
        mode,
        timestamp: Arc::new(|| STAMP.to_string()),
        ..ExportOptions::default()
    }
}

/// Number of message blocks in a rendered page.
pub fn message_blocks(page: &str) -> usize {
    page.matches("<div class=\"msg").count()
}
