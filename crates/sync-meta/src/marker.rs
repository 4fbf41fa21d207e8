//! Metadata marker comments.
//!
//! A marker is a comment whose complete text has the shape:
//! ```text
//! !
//! payload
//! !
//! ```
//! Matching is anchored on the raw comment text. Nothing may precede the
//! opening `!` or follow the closing one, whitespace included.

use std::sync::LazyLock;

use regex::Regex;
use sync_xml::{LineEnding, NodePath, XmlDocument};

static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^!(?P<value>.*)!$").expect("Invalid marker regex"));

/// Return the payload if `comment` is a marker.
///
/// The payload is everything between the sentinels, including the line
/// breaks written by [`wrap`].
///
/// # Example
/// ```
/// use sync_meta::marker::match_marker;
///
/// assert_eq!(match_marker("!\nid=42\n!"), Some("\nid=42\n"));
/// assert_eq!(match_marker(" !id=42!"), None);
/// assert_eq!(match_marker("see !note!"), None);
/// ```
pub fn match_marker(comment: &str) -> Option<&str> {
    MARKER_PATTERN
        .captures(comment)
        .and_then(|cap| cap.name("value"))
        .map(|m| m.as_str())
}

/// Build the comment text for a payload, with the sentinels on their own lines
pub fn wrap(payload: &str, line_ending: LineEnding) -> String {
    let nl = line_ending.as_str();
    format!("!{nl}{payload}{nl}!")
}

/// Outcome of looking for markers across a whole document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerScan {
    None,
    Found { path: NodePath, payload: String },
    Multiple { count: usize },
}

/// Check every comment, last first, and report the single marker if there is one.
///
/// All comments are always inspected so that duplicates are detected.
pub fn scan_markers(doc: &XmlDocument) -> MarkerScan {
    let mut found = None;
    let mut count = 0;

    for comment in doc.comments().into_iter().rev() {
        let Some(payload) = match_marker(comment.text) else {
            continue;
        };
        count += 1;
        if found.is_none() {
            found = Some((comment.path, payload.to_string()));
        }
    }

    match (count, found) {
        (1, Some((path, payload))) => MarkerScan::Found { path, payload },
        (0, _) | (_, None) => MarkerScan::None,
        (count, _) => MarkerScan::Multiple { count },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("!!", Some(""))]
    #[case("!payload!", Some("payload"))]
    #[case("!\nSchema: xtk:jst\nName: zne:a\n!", Some("\nSchema: xtk:jst\nName: zne:a\n"))]
    #[case("!a!b!", Some("a!b"))]
    #[case("!", None)]
    #[case("!payload! ", None)]
    #[case("\n!payload!", None)]
    #[case("payload", None)]
    #[case("text !payload! text", None)]
    fn test_match_marker(#[case] comment: &str, #[case] expected: Option<&str>) {
        assert_eq!(match_marker(comment), expected);
    }

    #[test]
    fn test_wrap_line_endings() {
        assert_eq!(wrap("id=42", LineEnding::Lf), "!\nid=42\n!");
        assert_eq!(wrap("id=42", LineEnding::CrLf), "!\r\nid=42\r\n!");
    }

    #[test]
    fn test_wrapped_payload_matches() {
        let wrapped = wrap("a\nb", LineEnding::Lf);
        assert_eq!(match_marker(&wrapped), Some("\na\nb\n"));
    }

    #[test]
    fn test_scan_counts_all_markers() {
        let doc = XmlDocument::parse("<root><!--!a!--><!--plain--><x><!--!b!--></x></root>").unwrap();
        assert_eq!(scan_markers(&doc), MarkerScan::Multiple { count: 2 });
    }

    #[test]
    fn test_scan_single_marker() {
        let doc = XmlDocument::parse("<root><!--plain--><x><!--!b!--></x></root>").unwrap();
        assert_eq!(
            scan_markers(&doc),
            MarkerScan::Found {
                path: NodePath::from(vec![0, 1, 0]),
                payload: "b".to_string(),
            }
        );
    }

    #[test]
    fn test_scan_without_markers() {
        let doc = XmlDocument::parse("<root><!-- ! --></root>").unwrap();
        assert_eq!(scan_markers(&doc), MarkerScan::None);
    }
}
