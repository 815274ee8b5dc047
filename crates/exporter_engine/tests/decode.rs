use exporter_engine::decode_page;
use pretty_assertions::assert_eq;

#[test]
fn utf8_bom_wins() {
    let decoded = decode_page(b"\xEF\xBB\xBF<p>hello</p>").unwrap();
    assert_eq!(decoded.html, "<p>hello</p>");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn meta_charset_is_respected() {
    let bytes = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>caf\xe9</body></html>";
    let decoded = decode_page(bytes).unwrap();
    assert!(decoded.html.contains("caf\u{e9}"));
    assert_eq!(decoded.encoding_label, "windows-1252");
}

#[test]
fn plain_utf8_is_detected() {
    let decoded = decode_page("<p>日本語のテキストです</p>".as_bytes()).unwrap();
    assert_eq!(decoded.html, "<p>日本語のテキストです</p>");
}

#[test]
fn declared_utf8_with_bad_bytes_fails() {
    let bytes = b"<meta charset=\"utf-8\"><p>\xff\xfe\xfd</p>";
    assert!(decode_page(bytes).is_err());
}
