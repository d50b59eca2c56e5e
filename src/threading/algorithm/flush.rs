//! Copying the final tree shape back onto the caller's records
//!
//! Containers are visited in reverse pre-order. By the time a container is
//! reached its first child and its next sibling have already been turned into
//! finished records, so each record receives them through `set_child` and
//! `set_next` and is then parked until its own parent or previous sibling
//! picks it up.

use super::super::container::{ContainerArena, NodeId};
use super::super::record::Threadable;
use super::super::stats::ThreadStats;
use super::tree_traversal::preorder;

/// Hand the threaded forest below `root` back as linked records.
///
/// Phantoms still present here get a placeholder record made from their first
/// child's record. A phantom left without children is skipped and no longer
/// counted in `stats.roots`. The arena is consumed: nothing of the run
/// survives.
///
/// Returns the record of the root's first child, or `None` for empty input.
pub fn flush<R: Threadable>(
    mut arena: ContainerArena<R>,
    root: NodeId,
    stats: &mut ThreadStats,
) -> Option<R> {
    assert!(
        arena[root].next.is_none(),
        "synthetic root has a next sibling {:?}",
        arena[root].next
    );

    let first = arena[root].child;
    let order = preorder(&arena, first);
    let mut finished: Vec<Option<R>> = std::iter::repeat_with(|| None)
        .take(arena.len())
        .collect();

    for &id in order.iter().rev() {
        let container = &mut arena[id];
        let record = container.record.take();
        let child = container
            .child
            .take()
            .and_then(|child| finished[child.index()].take());
        let next = container
            .next
            .take()
            .and_then(|next| finished[next.index()].take());
        let root_member = container.parent.take().is_none();

        let mut record = match (record, child.as_ref()) {
            (Some(record), _) => record,
            (None, Some(template)) => {
                stats.dummies_materialized += 1;
                template.make_dummy()
            }
            (None, None) => {
                // Phantom whose children were all pruned below it: whoever
                // links to it gets its next sibling instead
                stats.pruned += 1;
                if root_member {
                    stats.roots = stats.roots.saturating_sub(1);
                }
                finished[id.index()] = next;
                continue;
            }
        };

        record.set_child(child);
        record.set_next(next);
        finished[id.index()] = Some(record);
    }

    first.and_then(|first| finished[first.index()].take())
}
