use exporter_engine::{ContentMode, Extractor, MessageExtractor};
use pretty_assertions::assert_eq;
use scraper::{Html, Selector};

fn extract(mode: ContentMode, inner: &str) -> Option<String> {
    let doc = Html::parse_fragment(&format!(r#"<div class="mes_text">{inner}</div>"#));
    let sel = Selector::parse(".mes_text").unwrap();
    MessageExtractor::new(mode).extract(doc.select(&sel).next())
}

#[test]
fn markup_mode_keeps_table_nesting_verbatim() {
    let table = "<table><tbody><tr><td>x</td></tr></tbody></table>";
    assert_eq!(extract(ContentMode::Markup, table).as_deref(), Some(table));
}

#[test]
fn markup_mode_keeps_table_rows_without_explicit_body() {
    let out = extract(ContentMode::Markup, "<table><tr><td>x</td></tr></table>").unwrap();
    assert!(out.starts_with("<table>"));
    assert!(out.contains("<tr><td>x</td></tr>"));
    assert!(out.ends_with("</table>"));
}

#[test]
fn markup_mode_keeps_rich_structure_and_drops_noise() {
    let inner = r#"<p><em>Hi</em> there</p><span class="timestamp">12:01</span><pre><code>let x = 1;</code></pre><div class="swipe-controls"><span>1/3</span></div><details><summary>state</summary><StatusBlock>hp: 9</StatusBlock></details>"#;
    let out = extract(ContentMode::Markup, inner).unwrap();
    assert_eq!(
        out,
        "<p><em>Hi</em> there</p><pre><code>let x = 1;</code></pre><details><summary>state</summary></details>"
    );
}

#[test]
fn markup_mode_turns_nbsp_into_spaces_and_trims() {
    let out = extract(ContentMode::Markup, "\n  <p>a&nbsp;b</p>&nbsp;\n").unwrap();
    assert_eq!(out, "<p>a b</p>");
}

#[test]
fn markup_mode_treats_blank_content_as_missing() {
    assert_eq!(extract(ContentMode::Markup, "  \n "), None);
    assert_eq!(extract(ContentMode::Markup, r#"<span class="message-id">#4</span>"#), None);
}

#[test]
fn missing_content_element_is_not_an_error() {
    assert_eq!(MessageExtractor::new(ContentMode::PlainText).extract(None), None);
}

#[test]
fn plain_text_decodes_basic_entities() {
    let out = extract(ContentMode::PlainText, "<p>Tom &amp; Jerry &lt;3 &gt;</p>").unwrap();
    assert_eq!(out, "Tom & Jerry <3 >");
}

#[test]
fn plain_text_maps_blocks_to_line_breaks() {
    let out = extract(
        ContentMode::PlainText,
        "<p>one</p><div>two</div>three<br>four",
    )
    .unwrap();
    assert_eq!(out, "one\n\ntwo\nthree\nfour");
}

#[test]
fn plain_text_ignores_angle_brackets_in_attribute_values() {
    assert_eq!(
        extract(ContentMode::PlainText, r#"<span title="hp > 50">ok</span>"#).as_deref(),
        Some("ok")
    );
    assert_eq!(
        extract(
            ContentMode::PlainText,
            r#"<div data-note="a > b">one</div>two<br class="x > y">three"#
        )
        .as_deref(),
        Some("one\ntwo\nthree")
    );
}

#[test]
fn plain_text_collapses_blank_runs() {
    let out = extract(ContentMode::PlainText, "<p>a</p><p></p><p></p><br><br><br>b").unwrap();
    assert_eq!(out, "a\n\nb");
}

#[test]
fn plain_text_strips_unterminated_status_block() {
    assert_eq!(
        extract(
            ContentMode::PlainText,
            "&lt;StatusBlock&gt;\nhp: 10\nmood: calm\n"
        ),
        None
    );
}

#[test]
fn status_block_element_is_filtered_in_both_modes() {
    let inner = "<StatusBlock>hp: 10";
    assert_eq!(extract(ContentMode::PlainText, inner), None);
    assert_eq!(extract(ContentMode::Markup, inner), None);
}

#[test]
fn plain_text_strips_yaml_fences_but_keeps_other_code() {
    let out = extract(
        ContentMode::PlainText,
        "<p>look</p><pre>```yaml\nmood: calm\n```</pre><pre>```rust\nfn x() {}\n```</pre>",
    )
    .unwrap();
    assert_eq!(out, "look\n\n```rust\nfn x() {}\n```");
}

#[test]
fn plain_text_keeps_rendered_yaml_code_blocks() {
    let out = extract(
        ContentMode::PlainText,
        r#"<pre><code class="language-yaml">hp: 1</code></pre>tail"#,
    )
    .unwrap();
    assert_eq!(out, "hp: 1tail");
}
