use regex::Regex;
use std::sync::LazyLock;

/// `http://` or `https://` followed by one or more non-whitespace characters
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is a valid regex"));

/// A run of message text, either plain or a detected hyperlink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link(String),
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text(text) | Segment::Link(text) => text,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Segment::Link(_))
    }
}

/// Split message text into plain and hyperlink segments.
///
/// Every URL match becomes a [`Segment::Link`]; the text between matches is
/// kept verbatim. Concatenating the segments gives back the input.
pub fn linkify(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for found in URL_PATTERN.find_iter(text) {
        if found.start() > last {
            segments.push(Segment::Text(text[last..found.start()].to_string()));
        }
        segments.push(Segment::Link(found.as_str().to_string()));
        last = found.end();
    }

    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_string()));
    }

    segments
}
