//! Conversation transcript.
//!
//! An ordered log of [`Entry`] values. Entries are only ever appended; the
//! text of an existing entry can be replaced in place (used to resolve the
//! pending answer placeholder), but nothing is removed or reordered, so an
//! [`EntryIndex`] stays valid for the life of the transcript.

use std::fmt;

use crate::error::{Result, TranscriptError};

/// Who produced an entry. Drives the visual role only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub speaker: Speaker,
    pub text: String,
}

impl Entry {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self { speaker, text: text.into() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text)
    }

    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}

/// Stable position of an entry in a [`Transcript`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryIndex(usize);

impl EntryIndex {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered conversation log, oldest entry first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript seeded with the assistant's welcome entry
    pub fn with_welcome(text: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.append(Entry::assistant(text));
        transcript
    }

    /// Add an entry at the end and return its index
    pub fn append(&mut self, entry: Entry) -> EntryIndex {
        self.entries.push(entry);
        EntryIndex(self.entries.len() - 1)
    }

    /// Replace the text of an existing entry, keeping its speaker and position
    pub fn update_at(&mut self, index: EntryIndex, text: impl Into<String>) -> Result<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index.0)
            .ok_or(TranscriptError::IndexOutOfRange { index: index.0, len })?;
        entry.text = text.into();
        Ok(())
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: EntryIndex) -> Option<&Entry> {
        self.entries.get(index.0)
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Texts of every user entry, oldest first (for input history recall)
    pub fn user_messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.is_user())
            .map(|entry| entry.text.clone())
            .collect()
    }
}
