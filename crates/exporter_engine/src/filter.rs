use ego_tree::NodeId;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Structural roles that never belong to exported message content.
///
/// Tag names are matched in lowercase, so `statusblock` also covers
/// `<StatusBlock>` wherever it is nested.
pub const EXCLUDED_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    ".timestamp",
    ".message-id",
    ".edit-controls",
    ".mes_edit_buttons",
    ".mes_buttons",
    ".swipe-controls",
    ".avatar",
    ".mes_edit_cancel",
    ".mes_edit_save",
    ".mes_edit_delete",
    "statusblock",
];

static EXCLUSION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&EXCLUDED_SELECTORS.join(", ")).expect("exclusion selectors are valid CSS")
});

/// A detached copy of one message subtree with excluded nodes removed.
#[derive(Debug, Clone)]
pub struct FilteredFragment {
    fragment: Html,
}

impl FilteredFragment {
    /// Inner markup of the filtered copy, serialized as-is.
    pub fn inner_html(&self) -> String {
        self.fragment.root_element().inner_html()
    }

    pub fn is_empty(&self) -> bool {
        self.fragment.root_element().children().next().is_none()
    }
}

/// Copy `root`'s children into a private fragment and drop every excluded node.
///
/// The source tree is only read. A missing subtree yields an empty fragment.
pub fn filter_subtree(root: Option<ElementRef<'_>>) -> FilteredFragment {
    let source = root.map(|element| element.inner_html()).unwrap_or_default();
    filter_markup(&source)
}

/// Same as [`filter_subtree`] for markup that is already serialized.
pub fn filter_markup(markup: &str) -> FilteredFragment {
    let mut fragment = Html::parse_fragment(markup);
    let excluded: Vec<NodeId> = fragment.select(&EXCLUSION).map(|el| el.id()).collect();
    for id in excluded {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }
    FilteredFragment { fragment }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_status_block_is_removed() {
        let filtered =
            filter_markup("<p>keep</p><details><summary>s</summary><StatusBlock>hp: 3</StatusBlock></details>");
        let html = filtered.inner_html();
        assert!(html.contains("<p>keep</p>"));
        assert!(!html.to_ascii_lowercase().contains("statusblock"));
        assert!(!html.contains("hp: 3"));
    }

    #[test]
    fn controls_and_scripts_are_removed() {
        let filtered = filter_markup(
            r#"<span class="timestamp">12:00</span><div class="mes_buttons"><b>edit</b></div><script>x()</script>text<img class="avatar" src="a.png">"#,
        );
        assert_eq!(filtered.inner_html(), "text");
    }

    #[test]
    fn exclusion_is_structural_not_textual() {
        let filtered = filter_markup("<p>the timestamp avatar script</p>");
        assert_eq!(filtered.inner_html(), "<p>the timestamp avatar script</p>");
    }

    #[test]
    fn missing_subtree_is_empty() {
        let filtered = filter_subtree(None);
        assert!(filtered.is_empty());
        assert_eq!(filtered.inner_html(), "");
    }

    #[test]
    fn source_document_is_not_mutated() {
        let doc = Html::parse_document(
            r#"<div id="m"><span class="timestamp">now</span><p>hi</p></div>"#,
        );
        let sel = Selector::parse("#m").unwrap();
        let root = doc.select(&sel).next();
        let filtered = filter_subtree(root);
        assert_eq!(filtered.inner_html(), "<p>hi</p>");
        let again = doc.select(&sel).next().unwrap().inner_html();
        assert!(again.contains("timestamp"));
    }
}
