//! Conversation threading for mail and news messages.
//!
//! The [`threading`] module holds the JWZ threading engine, generic over any
//! record type implementing [`Threadable`]. The remaining modules provide a
//! ready-made record type and the plumbing used by the `mail-threader` binary.

pub mod error;
pub mod loader;
pub mod message;
pub mod parser;
pub mod render;
pub mod threading;

pub use error::{LoadError, RenderError};
pub use message::ThreadedMessage;
pub use parser::{ParseMessageError, parse_message};
pub use threading::{ThreadStats, Threadable, Threader, ThreadingConfig, thread};

#[cfg_attr(not(test), allow(dead_code))]
pub mod test_support {
    //! Helpers for building and inspecting threads in tests.

    use std::collections::HashMap;

    use crate::message::ThreadedMessage;

    /// Message with the given id, references and raw subject
    pub fn message(id: &str, references: &[&str], subject: &str) -> ThreadedMessage {
        ThreadedMessage::new(
            id,
            references.iter().map(|r| r.to_string()).collect(),
            Some(subject),
        )
    }

    /// Forest as indented lines of message ids; placeholders show as `*`.
    pub fn outline(head: Option<&ThreadedMessage>) -> Vec<String> {
        head.map(|head| {
            head.walk()
                .map(|(depth, m)| {
                    let label = if m.dummy { "*" } else { m.message_id.as_str() };
                    format!("{}{}", "  ".repeat(depth), label)
                })
                .collect()
        })
        .unwrap_or_default()
    }

    /// Parent message id of every real message (None for roots).
    ///
    /// Placeholder parents are reported as `"*"`. Duplicate ids are suffixed
    /// with `#n` in walk order so each occurrence gets its own entry.
    pub fn parents(head: Option<&ThreadedMessage>) -> HashMap<String, Option<String>> {
        let mut parents = HashMap::new();
        let Some(head) = head else {
            return parents;
        };

        let mut stack: Vec<(&ThreadedMessage, Option<String>)> = head
            .siblings()
            .map(|root| (root, None))
            .collect();
        stack.reverse();

        let mut seen: HashMap<&str, usize> = HashMap::new();
        while let Some((current, parent)) = stack.pop() {
            let label = if current.dummy {
                "*".to_string()
            } else {
                let count = seen.entry(current.message_id.as_str()).or_insert(0);
                *count += 1;
                let label = if *count == 1 {
                    current.message_id.clone()
                } else {
                    format!("{}#{}", current.message_id, count)
                };
                parents.insert(label.clone(), parent);
                label
            };

            let mut kids: Vec<(&ThreadedMessage, Option<String>)> = current
                .children()
                .map(|kid| (kid, Some(label.clone())))
                .collect();
            kids.reverse();
            stack.extend(kids);
        }

        parents
    }
}
