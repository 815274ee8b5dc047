use crate::extract::ContentMode;
use crate::types::Message;

const STYLE: &str = r#"
body{font-family:Inter,"Noto Sans SC",sans-serif;margin:0;padding:1.5em;line-height:1.6;background:#fff;color:#222;}
.msg{margin-bottom:1.2em;}
.msg.plain{white-space:pre-wrap;}
.role{font-weight:600;margin-right:.3em;}
table{border-collapse:collapse;width:100%;margin:1em 0;}
th,td{border:1px solid #ccc;padding:.4em;vertical-align:top;}
pre{background:#f7f7f7;padding:.6em;border-radius:4px;overflow:auto;}
code{background:#f5f5f5;padding:.1em .3em;border-radius:3px;}
"#;

/// Wrap a body fragment into a standalone page. The fragment is inserted
/// untouched; only the title is escaped.
pub fn wrap_document(title: &str, body_fragment: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head><body>{body_fragment}</body></html>",
        title = escape_text(title),
    )
}

/// Body of a per-speaker document.
pub fn role_body<S: AsRef<str>>(fragments: &[S], mode: ContentMode) -> String {
    fragments
        .iter()
        .map(|fragment| {
            format!(
                "<div class=\"{}\">{}</div>",
                msg_class(mode),
                content(fragment.as_ref(), mode)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Body of the combined document: every message prefixed by its speaker.
pub fn combined_body(messages: &[Message], mode: ContentMode) -> String {
    messages
        .iter()
        .map(|message| {
            format!(
                "<div class=\"{}\"><span class=\"role\">{}:</span> {}</div>",
                msg_class(mode),
                escape_text(&message.speaker),
                content(&message.content, mode)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn msg_class(mode: ContentMode) -> &'static str {
    match mode {
        ContentMode::Markup => "msg",
        ContentMode::PlainText => "msg plain",
    }
}

fn content(fragment: &str, mode: ContentMode) -> String {
    match mode {
        ContentMode::Markup => fragment.to_string(),
        ContentMode::PlainText => escape_text(fragment),
    }
}

pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wrapper_keeps_malformed_fragment() {
        let page = wrap_document("T", "<b>unclosed");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("<body><b>unclosed</body>"));
    }

    #[test]
    fn title_is_escaped() {
        let page = wrap_document("<A> & B", "");
        assert!(page.contains("<title>&lt;A&gt; &amp; B</title>"));
    }

    #[test]
    fn role_body_joins_messages() {
        assert_eq!(
            role_body(&["<p>a</p>", "b"], ContentMode::Markup),
            "<div class=\"msg\"><p>a</p></div>\n<div class=\"msg\">b</div>"
        );
    }

    #[test]
    fn plain_text_content_is_escaped() {
        assert_eq!(
            role_body(&["1 < 2"], ContentMode::PlainText),
            "<div class=\"msg plain\">1 &lt; 2</div>"
        );
    }
}
