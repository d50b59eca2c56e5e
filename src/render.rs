//! Text and JSON renderings of a threaded forest.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::RenderError;
use crate::message::ThreadedMessage;

/// Serializable view of one message in a threaded forest.
///
/// Nodes are listed in thread order (each message before its replies, replies
/// before the next sibling); `parent_id` and `depth` give the tree shape.
#[derive(Debug, Serialize)]
pub struct ThreadNode<'a> {
    pub message_id: &'a str,
    pub parent_id: Option<&'a str>,
    pub depth: usize,
    pub subject: Option<&'a str>,
    pub from: Option<&'a str>,
    pub date: Option<DateTime<Utc>>,
    pub dummy: bool,
}

/// Every message of the forest, in thread order
pub fn thread_nodes(head: Option<&ThreadedMessage>) -> Vec<ThreadNode<'_>> {
    let Some(head) = head else {
        return Vec::new();
    };

    // Ids of the messages above the current one, root first
    let mut path: Vec<&str> = Vec::new();
    let mut nodes = Vec::new();

    for (depth, message) in head.walk() {
        path.truncate(depth);
        nodes.push(ThreadNode {
            message_id: &message.message_id,
            parent_id: path.last().copied(),
            depth,
            subject: message.subject.as_deref(),
            from: message.from.as_deref(),
            date: message.date,
            dummy: message.dummy,
        });
        path.push(&message.message_id);
    }

    nodes
}

/// Pretty-printed JSON array of [`ThreadNode`]s
pub fn render_json(head: Option<&ThreadedMessage>) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(&thread_nodes(head))?)
}

/// One line per message, indented two spaces per level.
///
/// Placeholders for unseen messages are shown as `[missing]`.
pub fn render_text(head: Option<&ThreadedMessage>) -> String {
    let Some(head) = head else {
        return String::new();
    };

    let mut out = String::new();
    for (depth, message) in head.walk() {
        out.push_str(&"  ".repeat(depth));
        if message.dummy {
            out.push_str("[missing]");
        } else {
            out.push_str(message.subject.as_deref().unwrap_or("(no subject)"));
            out.push_str(" <");
            out.push_str(&message.message_id);
            out.push('>');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threading::Threadable;

    fn forest() -> ThreadedMessage {
        let mut root = ThreadedMessage::new("p", vec![], Some("Plan"));
        let reply = ThreadedMessage::new("r", vec!["p".into()], Some("Re: Plan"));
        let dummy = root.make_dummy();
        root.set_child(Some(reply));
        let mut head = dummy;
        head.set_child(Some(root));
        head
    }

    #[test]
    fn test_render_text_indents() {
        let head = forest();
        assert_eq!(
            render_text(Some(&head)),
            "[missing]\n  Plan <p>\n    Re: Plan <r>\n"
        );
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(None), "");
    }

    #[test]
    fn test_render_json_lists_nodes_with_parents() {
        let head = forest();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(Some(&head)).unwrap()).unwrap();
        let nodes = json.as_array().unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0]["dummy"], true);
        assert_eq!(nodes[0]["parent_id"], serde_json::Value::Null);
        assert_eq!(nodes[1]["message_id"], "p");
        assert_eq!(nodes[1]["parent_id"], "dummy:p");
        assert_eq!(nodes[2]["subject"], "Re: Plan");
        assert_eq!(nodes[2]["parent_id"], "p");
        assert_eq!(nodes[2]["depth"], 2);
    }

    #[test]
    fn test_thread_nodes_parent_resets_between_roots() {
        let mut a = ThreadedMessage::new("a", vec![], Some("One"));
        let mut b = ThreadedMessage::new("b", vec!["a".into()], Some("Re: One"));
        let c = ThreadedMessage::new("c", vec![], Some("Two"));
        b.set_child(Some(ThreadedMessage::new("d", vec![], None)));
        a.set_child(Some(b));
        a.set_next(Some(c));

        let parents: Vec<(&str, Option<&str>)> = thread_nodes(Some(&a))
            .iter()
            .map(|node| (node.message_id, node.parent_id))
            .collect();

        assert_eq!(
            parents,
            vec![("a", None), ("b", Some("a")), ("d", Some("b")), ("c", None)]
        );
    }

    #[test]
    fn test_deep_thread_renders_without_recursion() {
        let records: Vec<ThreadedMessage> = (0..5_000)
            .map(|i| {
                let references = if i == 0 {
                    vec![]
                } else {
                    vec![format!("m{}", i - 1)]
                };
                ThreadedMessage::new(format!("m{i}"), references, Some("Chain"))
            })
            .collect();
        let head = crate::threading::thread(records);

        let json: serde_json::Value =
            serde_json::from_str(&render_json(head.as_ref()).unwrap()).unwrap();
        let nodes = json.as_array().unwrap();
        assert_eq!(nodes.len(), 5_000);
        assert_eq!(nodes[4_999]["depth"], 4_999);
        assert_eq!(nodes[4_999]["parent_id"], "m4998");

        assert_eq!(render_text(head.as_ref()).lines().count(), 5_000);
    }
}
