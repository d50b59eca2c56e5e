//! Subject simplification for threading
//!
//! Subject gathering compares subjects after removing everything that differs
//! between an original message and its replies or forwards:
//!
//! - Reply prefixes: `Re:`, `RE:`, `Re[2]:`, `Re^3:`, `Aw:`, `Sv:`
//! - Forward prefixes: `Fwd:`, `Fw:`
//! - Bracketed tags: `[PATCH]`, `[PATCH v2 1/3]`, `[linux-mm]`, etc.
//! - Multiple spaces collapsed to single space, case folded
//!
//! Prefixes and tags are removed repeatedly, so `Re: [PATCH] Re: Fix` and
//! `Fix` simplify to the same subject.

use regex::Regex;
use std::sync::OnceLock;

static REPLY_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
static FORWARD_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

/// `Re:` and its localized/counted variants
fn reply_prefix_regex() -> &'static Regex {
    REPLY_PREFIX_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^(?:re|aw|sv)\s*(?:\[\d+\]|\^\d+)?\s*:\s*")
            .expect("Invalid reply prefix regex")
    })
}

fn forward_prefix_regex() -> &'static Regex {
    FORWARD_PREFIX_REGEX
        .get_or_init(|| Regex::new(r"(?i)^fwd?\s*:\s*").expect("Invalid forward prefix regex"))
}

/// Leading `[...]` tag
fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"^\[[^\]]*\]\s*").expect("Invalid subject tag regex"))
}

/// Result of simplifying a raw subject line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifiedSubject {
    /// Comparable subject text, None if nothing is left after simplification
    pub text: Option<String>,
    /// Whether a reply prefix was removed
    pub is_reply: bool,
}

/// Simplify a raw subject for thread gathering.
///
/// ## Examples
///
/// ```rust
/// use mail_threader::threading::simplify_subject;
///
/// let simplified = simplify_subject("Re: [PATCH v2] Fix memory leak");
/// assert_eq!(simplified.text.as_deref(), Some("fix memory leak"));
/// assert!(simplified.is_reply);
///
/// let simplified = simplify_subject("Fwd: Lunch");
/// assert_eq!(simplified.text.as_deref(), Some("lunch"));
/// assert!(!simplified.is_reply);
/// ```
pub fn simplify_subject(subject: &str) -> SimplifiedSubject {
    let mut rest = subject.trim();
    let mut is_reply = false;

    // Keep removing prefixes until none match
    loop {
        if let Some(found) = reply_prefix_regex().find(rest) {
            rest = &rest[found.end()..];
            is_reply = true;
        } else if let Some(found) = forward_prefix_regex().find(rest) {
            rest = &rest[found.end()..];
        } else if let Some(found) = tag_regex().find(rest) {
            rest = &rest[found.end()..];
        } else {
            break;
        }
    }

    // Collapse multiple spaces into one
    let words: Vec<&str> = rest.split_whitespace().collect();
    let text = words.join(" ").to_lowercase();

    SimplifiedSubject {
        text: (!text.is_empty()).then_some(text),
        is_reply,
    }
}
