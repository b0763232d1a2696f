//! Append-only conversation timeline.
//!
//! Holds the ordered message log for one session and manages the lifecycle
//! of the transient typing placeholder.

use wellness_core::{ButtonOption, Message, Sender};

/// Ordered log of conversation entries.
///
/// Appends preserve strict insertion order; ids are assigned from a
/// monotonic counter, so two messages appended within the same instant
/// still order correctly. At most one typing placeholder exists at any
/// time, regardless of how show/hide calls interleave with appends.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: Vec<Message>,
    next_id: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The timeline as a read-only ordered sequence, for rendering.
    pub fn messages(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a user message.
    pub fn append_user(&mut self, text: impl Into<String>) -> &Message {
        let id = self.take_id();
        self.entries.push(Message {
            id,
            sender: Sender::User,
            text: text.into(),
            buttons: Vec::new(),
            is_typing: false,
        });
        self.entries.last().expect("just pushed")
    }

    /// Append a bot message, removing any pending typing placeholder first.
    pub fn append_bot(&mut self, text: impl Into<String>, buttons: Vec<ButtonOption>) -> &Message {
        self.hide_typing();
        let id = self.take_id();
        self.entries.push(Message {
            id,
            sender: Sender::Bot,
            text: text.into(),
            buttons,
            is_typing: false,
        });
        self.entries.last().expect("just pushed")
    }

    /// Append the typing placeholder. No-op if one is already present.
    pub fn show_typing(&mut self) {
        if self.has_typing() {
            return;
        }
        let id = self.take_id();
        self.entries.push(Message {
            id,
            sender: Sender::Bot,
            text: String::new(),
            buttons: Vec::new(),
            is_typing: true,
        });
    }

    /// Remove the typing placeholder if present. Idempotent.
    pub fn hide_typing(&mut self) {
        self.entries.retain(|m| !m.is_typing);
    }

    /// Whether a typing placeholder is currently shown.
    pub fn has_typing(&self) -> bool {
        self.entries.iter().any(|m| m.is_typing)
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
