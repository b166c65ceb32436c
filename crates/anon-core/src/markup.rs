//! Parsing of `<mark>` highlight markup in finalized output
//!
//! The finalization endpoint wraps every replaced span in `<mark>…</mark>`.
//! The TUI renders those spans with highlight styling; plain output strips
//! them.

use regex::Regex;

/// A run of text, highlighted or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

/// Split highlighted output into ordered segments
pub fn parse_marked(text: &str) -> Vec<Segment> {
    let re = Regex::new(r"(?s)<mark>(.*?)</mark>").unwrap();

    let mut segments = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        if whole.start() > last {
            segments.push(Segment {
                text: text[last..whole.start()].to_string(),
                highlighted: false,
            });
        }
        segments.push(Segment {
            text: caps[1].to_string(),
            highlighted: true,
        });
        last = whole.end();
    }
    if last < text.len() {
        segments.push(Segment {
            text: text[last..].to_string(),
            highlighted: false,
        });
    }
    segments
}

/// Remove `<mark>` markup, keeping the text inside
pub fn strip_marks(text: &str) -> String {
    let re = Regex::new(r"(?s)<mark>(.*?)</mark>").unwrap();
    re.replace_all(text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_segments() {
        let segments = parse_marked("Hello <mark>Jane</mark>, meet <mark>Joe</mark>.");
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0].text, "Hello ");
        assert!(!segments[0].highlighted);
        assert_eq!(segments[1].text, "Jane");
        assert!(segments[1].highlighted);
        assert_eq!(segments[4].text, ".");
    }

    #[test]
    fn plain_text_is_one_segment() {
        let segments = parse_marked("no markup here");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].highlighted);
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(parse_marked("").is_empty());
    }

    #[test]
    fn strip_removes_markup_only() {
        assert_eq!(
            strip_marks("Hello <mark>Jane</mark>, bye."),
            "Hello Jane, bye."
        );
        assert_eq!(strip_marks("untouched"), "untouched");
    }
}
