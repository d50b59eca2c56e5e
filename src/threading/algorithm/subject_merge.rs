//! Subject gathering for the root set
//!
//! Threads whose References never met can still belong together: a reply
//! sent by a client that drops References, or two messages that both reply to
//! a parent we never saw. At the root level only, threads with the same
//! simplified subject are folded into one.
//!
//! ## Representative selection
//!
//! For each subject one root container is chosen as the representative:
//!
//! 1. a phantom wins over a real message
//! 2. a message without a reply marker wins over a reply
//! 3. otherwise the first container found is kept
//!
//! ## Folding
//!
//! Every other root container with that subject is removed from the root set
//! and folded into the representative:
//!
//! - both phantoms: the children are concatenated under the representative
//! - representative is a phantom, or only the folded container is a reply:
//!   the folded container becomes a child of the representative
//! - otherwise both become siblings under a new phantom, since neither can be
//!   shown to be the parent of the other

use std::collections::HashMap;

use super::super::container::{Container, ContainerArena, NodeId};
use super::super::record::Threadable;
use super::super::stats::ThreadStats;

/// Merge root set members that share a simplified subject.
pub fn gather_subjects<R: Threadable>(
    arena: &mut ContainerArena<R>,
    root: NodeId,
    stats: &mut ThreadStats,
) {
    let subject_table = build_subject_table(arena, root);
    if subject_table.is_empty() {
        return;
    }

    let mut prev: Option<NodeId> = None;
    let mut cursor = arena[root].child;

    while let Some(current) = cursor {
        let rest = arena[current].next;

        let representative = thread_subject(arena, current)
            .and_then(|subject| subject_table.get(subject))
            .copied()
            .filter(|&representative| representative != current);

        let Some(representative) = representative else {
            prev = Some(current);
            cursor = rest;
            continue;
        };

        match prev {
            None => arena[root].child = rest,
            Some(prev) => arena[prev].next = rest,
        }
        arena[current].next = None;

        merge_into(arena, representative, current, stats);
        stats.subject_merges += 1;

        // prev stays put: current is no longer in the root set
        cursor = rest;
    }
}

/// Subject a root container is known by.
///
/// A phantom root is known by the subject of its first child. Empty subjects
/// never group anything.
fn thread_subject<R: Threadable>(arena: &ContainerArena<R>, id: NodeId) -> Option<&str> {
    let container = &arena[id];
    let carrier = if container.is_phantom() {
        &arena[container.child?]
    } else {
        container
    };

    carrier
        .record
        .as_ref()?
        .simplified_subject()
        .filter(|subject| !subject.is_empty())
}

fn is_reply<R: Threadable>(container: &Container<R>) -> bool {
    container
        .record
        .as_ref()
        .is_some_and(|record| record.subject_is_reply())
}

/// Choose one representative root container per subject.
fn build_subject_table<R: Threadable>(
    arena: &ContainerArena<R>,
    root: NodeId,
) -> HashMap<String, NodeId> {
    let mut subject_table: HashMap<String, NodeId> = HashMap::new();

    for current in arena.children(root) {
        let Some(subject) = thread_subject(arena, current) else {
            continue;
        };

        let replace = match subject_table.get(subject) {
            None => true,
            Some(&old) => {
                let old = &arena[old];
                let new = &arena[current];
                (new.is_phantom() && !old.is_phantom())
                    || (!old.is_phantom() && !new.is_phantom() && is_reply(old) && !is_reply(new))
            }
        };

        if replace {
            subject_table.insert(subject.to_string(), current);
        }
    }

    subject_table
}

/// Fold `folded` (already out of the root set) into `representative`.
fn merge_into<R: Threadable>(
    arena: &mut ContainerArena<R>,
    representative: NodeId,
    folded: NodeId,
    stats: &mut ThreadStats,
) {
    let representative_phantom = arena[representative].is_phantom();
    let folded_phantom = arena[folded].is_phantom();

    if representative_phantom && folded_phantom {
        if let Some(kids) = arena[folded].child.take() {
            arena.reparent_chain(kids, Some(representative));
            match arena.last_child(representative) {
                Some(tail) => arena[tail].next = Some(kids),
                None => arena[representative].child = Some(kids),
            }
        }
        log::trace!("merged phantom {folded:?} into phantom {representative:?}");
        return;
    }

    let folded_is_reply = !folded_phantom && is_reply(&arena[folded]);
    if representative_phantom || (folded_is_reply && !is_reply(&arena[representative])) {
        arena.push_child(representative, folded);
        log::trace!("made {folded:?} a child of {representative:?}");
        return;
    }

    // The representative turns into a phantom; its record and children move
    // to a new container, which becomes a sibling of the folded container.
    stats.placeholders += 1;
    let moved = arena.alloc(Container::new_phantom());
    let record = arena[representative].record.take();
    arena[moved].record = record;
    if let Some(kids) = arena[representative].child.take() {
        arena.reparent_chain(kids, Some(moved));
        arena[moved].child = Some(kids);
    }

    arena.push_child(representative, moved);
    arena.push_child(representative, folded);
    log::trace!("made {folded:?} and {moved:?} siblings under {representative:?}");
}
