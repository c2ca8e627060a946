//! Transcript rendering.
//!
//! The transcript is first turned into a [`RenderedTranscript`], a
//! target-neutral list of messages in display order (newest first) with
//! hyperlinks already detected. The [`html`] and [`terminal`] modules turn
//! that into markup or ratatui lines. Every render rebuilds the whole list
//! from the transcript snapshot.

pub mod html;
pub mod links;
pub mod terminal;

pub use links::{Segment, linkify};
pub use terminal::TranscriptRenderer;

use chatbox_core::{Entry, Speaker};

/// Visual role of a message in the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageRole {
    /// Sent by the person using the widget
    Visitor,
    /// Produced by the answering side, including placeholders and errors
    Operator,
}

impl MessageRole {
    pub fn for_speaker(speaker: Speaker) -> Self {
        match speaker {
            Speaker::User => MessageRole::Visitor,
            Speaker::Assistant => MessageRole::Operator,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MessageRole::Visitor => "messages__item--visitor",
            MessageRole::Operator => "messages__item--operator",
        }
    }
}

/// A single message ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub role: MessageRole,
    pub segments: Vec<Segment>,
}

impl RenderedMessage {
    pub fn from_entry(entry: &Entry) -> Self {
        Self { role: MessageRole::for_speaker(entry.speaker), segments: linkify(&entry.text) }
    }

    /// Message text with link markup stripped
    pub fn text(&self) -> String {
        self.segments.iter().map(Segment::as_str).collect()
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter(|s| s.is_link()).map(Segment::as_str)
    }
}

/// Whole transcript in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTranscript {
    messages: Vec<RenderedMessage>,
}

impl RenderedTranscript {
    /// Build from entries in insertion order. The result is reversed.
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self { messages: entries.iter().rev().map(RenderedMessage::from_entry).collect() }
    }

    pub fn messages(&self) -> &[RenderedMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn to_html(&self) -> String {
        html::render_transcript(self)
    }

    /// One `name: text` line per message, newest first
    pub fn to_plain_text(&self, assistant_name: &str) -> String {
        self.messages
            .iter()
            .map(|message| {
                let label = match message.role {
                    MessageRole::Visitor => "You",
                    MessageRole::Operator => assistant_name,
                };
                format!("{}: {}", label, message.text())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
