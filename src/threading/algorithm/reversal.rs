//! Sibling order restoration
//!
//! Every child list is built by prepending, so before this pass siblings run
//! newest-first. Reversing each list once puts them back in input order.

use super::super::container::{ContainerArena, NodeId};

/// Reverse every child list below `root`, iteratively.
pub fn reverse_children<R>(arena: &mut ContainerArena<R>, root: NodeId) {
    let mut pending = vec![root];

    while let Some(owner) = pending.pop() {
        let mut reversed: Option<NodeId> = None;
        let mut cursor = arena[owner].child;

        while let Some(current) = cursor {
            cursor = arena[current].next;
            arena[current].next = reversed;
            reversed = Some(current);

            if arena[current].child.is_some() {
                pending.push(current);
            }
        }

        arena[owner].child = reversed;
    }
}
