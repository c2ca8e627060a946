use super::links::Segment;
use super::{RenderedMessage, RenderedTranscript};

/// Escape text so it displays as-is inside HTML markup
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_segment(out: &mut String, segment: &Segment) {
    match segment {
        Segment::Text(text) => out.push_str(&escape(text)),
        Segment::Link(url) => {
            let url = escape(url);
            out.push_str(&format!(r#"<a href="{url}" target="_blank">{url}</a>"#));
        }
    }
}

/// One `<div>` per message, with the role class and linkified content
pub fn render_message(message: &RenderedMessage) -> String {
    let mut out = format!(r#"<div class="messages__item {}">"#, message.role.css_class());
    for segment in &message.segments {
        write_segment(&mut out, segment);
    }
    out.push_str("</div>");
    out
}

/// Markup for the whole message container, newest message first
pub fn render_transcript(rendered: &RenderedTranscript) -> String {
    rendered.messages().iter().map(render_message).collect::<Vec<_>>().join("\n")
}
