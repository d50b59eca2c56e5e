//! Owned message record for threading
//!
//! [`ThreadedMessage`] is the record type used by the parser, loader and CLI.
//! After threading, the first root owns the whole forest: each message owns its
//! first child and its next sibling.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::threading::{Threadable, simplify_subject};

/// A message as seen by the threader, plus the links threading fills in.
///
/// A threaded message owns the rest of its forest, so it is neither `Clone`
/// nor `PartialEq`; `Debug` shows only the ids of its child and next sibling.
pub struct ThreadedMessage {
    /// Message-ID without angle brackets
    pub message_id: String,

    /// References, oldest first
    pub references: Vec<String>,

    /// Subject as it appeared in the message
    pub subject: Option<String>,

    /// Subject with reply prefixes and tags removed
    pub simplified_subject: Option<String>,

    /// Whether the subject carried a reply prefix
    pub is_reply: bool,

    pub date: Option<DateTime<Utc>>,

    pub from: Option<String>,

    /// Placeholder for a message that was referenced but never seen
    pub dummy: bool,

    child: Option<Box<ThreadedMessage>>,
    next: Option<Box<ThreadedMessage>>,
}

impl ThreadedMessage {
    /// Create a message, simplifying `subject` for thread gathering.
    pub fn new(message_id: impl Into<String>, references: Vec<String>, subject: Option<&str>) -> Self {
        let simplified = subject.map(simplify_subject);

        ThreadedMessage {
            message_id: message_id.into(),
            references,
            subject: subject.map(str::to_string),
            simplified_subject: simplified.as_ref().and_then(|s| s.text.clone()),
            is_reply: simplified.is_some_and(|s| s.is_reply),
            date: None,
            from: None,
            dummy: false,
            child: None,
            next: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn first_child(&self) -> Option<&ThreadedMessage> {
        self.child.as_deref()
    }

    pub fn next_sibling(&self) -> Option<&ThreadedMessage> {
        self.next.as_deref()
    }

    /// Direct replies, in thread order
    pub fn children(&self) -> Siblings<'_> {
        Siblings {
            cursor: self.first_child(),
        }
    }

    /// This message followed by its later siblings
    pub fn siblings(&self) -> Siblings<'_> {
        Siblings { cursor: Some(self) }
    }

    /// Depth-first walk over this message, its descendants, and its later
    /// siblings with their descendants. Depth starts at 0 for `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }
}

impl Threadable for ThreadedMessage {
    type Id = String;

    fn message_id(&self) -> &String {
        &self.message_id
    }

    fn references(&self) -> &[String] {
        &self.references
    }

    fn simplified_subject(&self) -> Option<&str> {
        self.simplified_subject.as_deref()
    }

    fn subject_is_reply(&self) -> bool {
        self.is_reply
    }

    fn is_dummy(&self) -> bool {
        self.dummy
    }

    fn make_dummy(&self) -> Self {
        ThreadedMessage {
            message_id: format!("dummy:{}", self.message_id),
            references: Vec::new(),
            subject: self.subject.clone(),
            simplified_subject: self.simplified_subject.clone(),
            is_reply: false,
            date: None,
            from: None,
            dummy: true,
            child: None,
            next: None,
        }
    }

    fn set_child(&mut self, child: Option<Self>) {
        self.child = child.map(Box::new);
    }

    fn set_next(&mut self, next: Option<Self>) {
        self.next = next.map(Box::new);
    }
}

impl fmt::Debug for ThreadedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadedMessage")
            .field("message_id", &self.message_id)
            .field("references", &self.references)
            .field("subject", &self.subject)
            .field("simplified_subject", &self.simplified_subject)
            .field("is_reply", &self.is_reply)
            .field("date", &self.date)
            .field("from", &self.from)
            .field("dummy", &self.dummy)
            .field("child", &self.first_child().map(|m| &m.message_id))
            .field("next", &self.next_sibling().map(|m| &m.message_id))
            .finish()
    }
}

impl Drop for ThreadedMessage {
    // Long sibling chains would otherwise be dropped recursively
    fn drop(&mut self) {
        let mut pending: Vec<Box<ThreadedMessage>> = Vec::new();
        pending.extend(self.child.take());
        pending.extend(self.next.take());

        while let Some(mut message) = pending.pop() {
            pending.extend(message.child.take());
            pending.extend(message.next.take());
        }
    }
}

/// Iterator along a chain of next-sibling links.
pub struct Siblings<'a> {
    cursor: Option<&'a ThreadedMessage>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = &'a ThreadedMessage;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = current.next_sibling();
        Some(current)
    }
}

/// Depth-first iterator yielding `(depth, message)` pairs.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a ThreadedMessage)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a ThreadedMessage);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, current) = self.stack.pop()?;

        if let Some(next) = current.next_sibling() {
            self.stack.push((depth, next));
        }
        if let Some(child) = current.first_child() {
            self.stack.push((depth + 1, child));
        }

        Some((depth, current))
    }
}
