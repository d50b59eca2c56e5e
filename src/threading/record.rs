//! The capability surface the threading engine needs from caller records
//!
//! The engine never looks inside a record beyond this trait. Records are moved
//! into a threading run and handed back as one forest: every record owns its
//! first child and its next sibling through the two setters.

use std::fmt::Debug;
use std::hash::Hash;

/// A message-like record that can be arranged into conversation threads.
///
/// ## Identity
///
/// `message_id` and the entries of `references` are compared for equality only.
/// Two records with the same identity are both kept; the engine does not merge
/// them.
///
/// ## Subjects
///
/// `simplified_subject` must already be normalized (reply markers and list
/// tags removed). `None` means the record has no subject at all. An empty
/// string is accepted but never used to group threads.
pub trait Threadable: Sized {
    /// Identity token type (typically the Message-ID string).
    type Id: Clone + Eq + Hash + Debug;

    /// Identity of this record.
    fn message_id(&self) -> &Self::Id;

    /// Referenced identities, oldest ancestor first. Empty when absent.
    fn references(&self) -> &[Self::Id];

    /// Normalized subject, or `None` when the record has no subject.
    fn simplified_subject(&self) -> Option<&str>;

    /// Whether the raw subject carried a reply marker such as `Re:`.
    fn subject_is_reply(&self) -> bool;

    /// Placeholder records are skipped when given as input.
    fn is_dummy(&self) -> bool {
        false
    }

    /// Manufacture a placeholder record of the same type.
    ///
    /// Called when an inferred ancestor that was never seen has to appear in
    /// the output. The returned record must report `is_dummy() == true` and
    /// must not carry over this record's child or next links.
    fn make_dummy(&self) -> Self;

    /// Set (or clear) this record's first child.
    fn set_child(&mut self, child: Option<Self>);

    /// Set (or clear) this record's next sibling.
    fn set_next(&mut self, next: Option<Self>);
}
