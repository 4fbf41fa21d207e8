//! Tests for XmlDocument parsing, editing and serialization

use pretty_assertions::assert_eq;
use rstest::rstest;
use sync_xml::{Error, LineEnding, Node, NodeKind, NodePath, WriterSettings, XmlDocument};

const SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-16"?>
<!DOCTYPE srcSchema>
<srcSchema name="recipient" namespace="cus" xmlns:x="urn:x">
    <!-- main -->
    <element name="recipient" label='Say "hi"'>
        <attribute name="email" x:type="string"/>
        <help>Use &amp; enjoy</help>
    </element>
</srcSchema>"#;

#[test]
fn test_schema_round_trip_snapshot() {
    let doc = XmlDocument::parse(SCHEMA).unwrap();
    insta::assert_snapshot!(doc.to_string(), @r#"
<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE srcSchema>
<srcSchema name="recipient" namespace="cus" xmlns:x="urn:x">
  <!-- main -->
  <element name="recipient" label='Say "hi"'>
    <attribute name="email" x:type="string" />
    <help>Use &amp; enjoy</help>
  </element>
</srcSchema>
"#);
}

#[rstest]
#[case("<root><child/></root>", "<root>\n  <child />\n</root>")]
#[case("<root>\n   <a>text</a>\n</root>", "<root>\n  <a>text</a>\n</root>")]
#[case("<!--top--><root/>", "<!--top-->\n<root />")]
#[case("<root/><!--tail-->", "<root />\n<!--tail-->")]
#[case("<?pi data?><root/>", "<?pi data?>\n<root />")]
#[case("<root><![CDATA[a<b]]></root>", "<root>a&lt;b</root>")]
#[case("<root>a&#13;b</root>", "<root>a&#13;b</root>")]
fn test_serialize_without_declaration(#[case] input: &str, #[case] expected: &str) {
    let doc = XmlDocument::parse(input).unwrap();
    assert!(doc.declaration().is_none());
    assert_eq!(doc.to_string(), expected);
}

#[test]
fn test_carriage_return_in_text_survives_reserialization() {
    let doc = XmlDocument::parse("<root><a>x&#13;\ny</a></root>").unwrap();
    let once = doc.to_string();
    let twice = XmlDocument::parse(&once).unwrap().to_string();

    assert_eq!(once, "<root>\n  <a>x&#13;\ny</a>\n</root>");
    assert_eq!(twice, once);
}

#[test]
fn test_declaration_is_kept_exactly_once() {
    let doc = XmlDocument::parse("<?xml version=\"1.0\"?><root/>").unwrap();
    let output = doc.to_string();
    assert_eq!(output, "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root />");
    assert_eq!(output.matches("<?xml").count(), 1);
}

#[test]
fn test_declared_encoding_matches_output() {
    let doc = XmlDocument::parse("<?xml version=\"1.0\" encoding=\"windows-1252\"?><root>é</root>")
        .unwrap();
    assert_eq!(
        doc.declaration().and_then(|d| d.encoding.as_deref()),
        Some("windows-1252")
    );

    let output = doc.to_string();
    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(std::str::from_utf8(output.as_bytes()).is_ok());
    assert!(output.contains("<root>é</root>"));
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let doc = XmlDocument::parse("\u{feff}<?xml version=\"1.0\"?><root/>").unwrap();
    assert!(doc.declaration().is_some());
    assert!(!doc.to_string().contains('\u{feff}'));
}

#[rstest]
#[case("")]
#[case("<root>")]
#[case("<a></b>")]
#[case("<a/><b/>")]
#[case("not xml")]
fn test_malformed_input_is_rejected(#[case] input: &str) {
    let err = XmlDocument::parse(input).unwrap_err();
    assert!(err.is_malformed());
    assert!(matches!(err, Error::Malformed { .. }));
}

#[test]
fn test_comments_in_document_order() {
    let doc = XmlDocument::parse("<!--a--><root><!--b--><x><!--c--></x></root><!--d-->").unwrap();
    let comments = doc.comments();
    let texts: Vec<&str> = comments.iter().map(|c| c.text).collect();
    assert_eq!(texts, vec!["a", "b", "c", "d"]);
    assert_eq!(comments[2].path, NodePath::from(vec![1, 1, 0]));
}

#[test]
fn test_remove_comment_leaves_siblings() {
    let mut doc = XmlDocument::parse("<root><a/><!--gone--><b/></root>").unwrap();
    let path = doc.comments()[0].path.clone();

    let removed = doc.remove_node(&path).unwrap();
    assert_eq!(removed, Node::Comment("gone".to_string()));
    assert!(doc.comments().is_empty());
    assert_eq!(doc.to_string(), "<root>\n  <a />\n  <b />\n</root>");
}

#[test]
fn test_prepend_comment_goes_after_declaration() {
    let mut doc = XmlDocument::parse("<?xml version=\"1.0\"?><root/>").unwrap();
    doc.prepend_comment("first").unwrap();

    assert_eq!(doc.children()[0].kind(), NodeKind::Comment);
    assert_eq!(
        doc.to_string(),
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!--first-->\n<root />"
    );
}

#[test]
fn test_preserved_whitespace_survives() {
    let doc =
        XmlDocument::parse("<root><pre xml:space=\"preserve\">  </pre><x>  </x></root>").unwrap();
    assert_eq!(doc.to_string(), "<root>\n  <pre xml:space=\"preserve\">  </pre>\n  <x />\n</root>");
}

#[test]
fn test_custom_writer_settings() {
    let doc = XmlDocument::parse("<root><child/></root>").unwrap();
    let settings = WriterSettings {
        indent: "    ".to_string(),
        line_ending: LineEnding::CrLf,
    };
    assert_eq!(doc.to_xml_string(&settings), "<root>\r\n    <child />\r\n</root>");
}

#[test]
fn test_from_str() {
    let doc: XmlDocument = "<root/>".parse().unwrap();
    assert_eq!(doc.root_element().map(|e| e.name.as_str()), Some("root"));
}
