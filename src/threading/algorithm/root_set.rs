//! Root set collection
//!
//! Root messages are the starting points of conversation threads. They have
//! no parent and become the children of one synthetic root container.

use super::super::container::{Container, ContainerArena, NodeId};

/// Gather every parentless container under a new synthetic root.
///
/// Root set members keep `parent = None`; only the synthetic root's child list
/// knows about them. Members are linked in reverse allocation order, like every
/// other child list before the reversal pass.
pub fn find_root_set<R>(arena: &mut ContainerArena<R>) -> NodeId {
    let root = arena.alloc(Container::new_phantom());

    let roots: Vec<NodeId> = arena
        .ids()
        .filter(|&id| id != root && arena[id].parent.is_none())
        .collect();

    for id in roots {
        assert!(
            arena[id].next.is_none(),
            "root set member {id:?} already has a next sibling"
        );
        arena.insert_first(root, id, None);
    }

    log::trace!("root set has {} members", arena.children(root).count());
    root
}
