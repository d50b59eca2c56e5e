//! Message header parsing.
//!
//! Turns raw RFC 5322 message bytes into [`ThreadedMessage`] records using the
//! `mailparse` crate. Only the headers threading needs are extracted:
//!
//! - **Message-ID**: identity (required)
//! - **References**: full reference chain from oldest to newest
//! - **In-Reply-To**: single-parent fallback when References is absent
//! - **Subject**: simplified for subject gathering
//! - **Date**, **From**: carried along for display
//!
//! # Error Handling
//!
//! Only a broken MIME structure or a missing Message-ID rejects a message.
//! Everything else degrades to an absent field.

use chrono::{DateTime, Utc};
use mailparse::{MailHeaderMap, parse_headers};
use thiserror::Error;

use crate::message::ThreadedMessage;

/// Errors that can be returned while parsing a message.
#[derive(Debug, Error)]
pub enum ParseMessageError {
    #[error("failed to parse headers: {0}")]
    MimeParse(#[from] mailparse::MailParseError),
    #[error("missing Message-ID header")]
    MissingMessageId,
}

/// Remove NUL bytes and surrounding whitespace
fn sanitize_text(text: &str) -> String {
    text.replace('\0', "").trim().to_string()
}

/// Clean and normalize message IDs by removing angle brackets and whitespace
fn normalize_message_id(msg_id: Option<String>) -> Option<String> {
    msg_id.and_then(|id| {
        let cleaned = id.trim().trim_matches(&['<', '>'][..]).trim();
        if cleaned.is_empty() {
            None
        } else {
            Some(sanitize_text(cleaned))
        }
    })
}

/// Extract message IDs from a References header
/// Uses whitespace-based splitting for better compatibility
fn extract_references(header_value: &str) -> Vec<String> {
    header_value
        .split_whitespace()
        .map(|id| {
            let cleaned = id.trim().trim_matches(&['<', '>'][..]);
            sanitize_text(cleaned)
        })
        .filter(|id| !id.is_empty())
        .collect()
}

/// First `<...>` id of an In-Reply-To header.
///
/// Some clients append free text ("<id> (message from Bob)"), so only the
/// first bracketed token counts. A bare id without brackets is accepted too.
fn extract_in_reply_to(header_value: &str) -> Option<String> {
    if let Some(start) = header_value.find('<') {
        let rest = &header_value[start + 1..];
        let end = rest.find('>')?;
        return normalize_message_id(Some(rest[..end].to_string()));
    }

    let first = header_value.split_whitespace().next()?;
    normalize_message_id(Some(first.to_string()))
}

fn parse_date(raw_date: Option<String>, message_id: &str) -> Option<DateTime<Utc>> {
    let raw = raw_date?;
    if raw.trim().is_empty() {
        return None;
    }

    match dateparser::parse(&raw) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(error) => {
            log::debug!("message {} has invalid date `{}`: {}", message_id, raw, error);
            None
        }
    }
}

/// Parse a message from raw bytes into a threading record.
///
/// # Returns
///
/// - `Ok(ThreadedMessage)`: the message with identity, references, subject,
///   date and sender filled in; thread links are empty
/// - `Err(...)`: malformed headers or no usable Message-ID
pub fn parse_message(raw: &[u8]) -> Result<ThreadedMessage, ParseMessageError> {
    let (headers, _) = parse_headers(raw).map_err(|e| {
        log::debug!("failed to parse headers: {}", e);
        ParseMessageError::MimeParse(e)
    })?;

    let message_id = normalize_message_id(headers.get_first_value("Message-ID"))
        .ok_or(ParseMessageError::MissingMessageId)?;

    let mut references = headers
        .get_first_value("References")
        .map(|v| extract_references(&v))
        .unwrap_or_default();

    if references.is_empty() {
        references.extend(
            headers
                .get_first_value("In-Reply-To")
                .and_then(|v| extract_in_reply_to(&v)),
        );
    }

    let subject = headers
        .get_first_value("Subject")
        .map(|s| sanitize_text(&s));

    let date = parse_date(headers.get_first_value("Date"), &message_id);
    let from = headers
        .get_first_value("From")
        .map(|s| sanitize_text(&s))
        .filter(|s| !s.is_empty());

    log::trace!("parsed: {} - {:?}", message_id, subject);

    let mut message = ThreadedMessage::new(message_id, references, subject.as_deref());
    if let Some(date) = date {
        message = message.with_date(date);
    }
    if let Some(from) = from {
        message = message.with_from(from);
    }
    Ok(message)
}
