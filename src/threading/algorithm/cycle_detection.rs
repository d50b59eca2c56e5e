//! Cycle detection for email threading
//!
//! Ensures that parent-child relationships don't create cycles in the thread tree.
//! A cycle would occur if we tried to make a parent a descendant of its own child.

use super::super::container::{ContainerArena, NodeId};

/// Check if linking a child to a parent would create a cycle
///
/// Walks up the ancestry chain from the proposed parent to ensure the proposed
/// child is not already one of its ancestors. Linking a container to itself
/// counts as a cycle.
///
/// ## Algorithm
///
/// Starting from the parent, walk up the tree following parent links.
/// If we encounter the child anywhere in this chain, linking would
/// create a cycle. The walk is bounded by the arena size, so a parent chain
/// that is already corrupt is reported as a cycle instead of looping.
///
/// ## Example
///
/// ```text
/// Current tree:  A → B → C
///
/// Trying to link: A under C (would create cycle A → B → C → A)
/// Result: true (cycle detected)
///
/// Trying to link: D under C (D is not in chain)
/// Result: false (safe to link)
/// ```
pub fn detect_cycle_in_ancestry<R>(
    arena: &ContainerArena<R>,
    child: NodeId,
    parent: NodeId,
) -> bool {
    let mut remaining = arena.len();
    let mut current = Some(parent);

    while let Some(node) = current {
        if node == child {
            return true;
        }

        if remaining == 0 {
            log::warn!("parent chain above {parent:?} is longer than the arena, treating as cycle");
            return true;
        }
        remaining -= 1;

        current = arena[node].parent;
    }

    false
}

/// Find the container directly below `ancestor` on the parent chain of
/// `descendant`.
///
/// Returns None if `ancestor` is not a proper ancestor of `descendant`.
pub fn child_on_path<R>(
    arena: &ContainerArena<R>,
    ancestor: NodeId,
    descendant: NodeId,
) -> Option<NodeId> {
    let mut remaining = arena.len();
    let mut current = descendant;

    while remaining > 0 {
        let parent = arena[current].parent?;
        if parent == ancestor {
            return Some(current);
        }
        current = parent;
        remaining -= 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threading::container::Container;

    /// A → B → C, plus a detached D
    fn chain() -> (ContainerArena<()>, [NodeId; 4]) {
        let mut arena = ContainerArena::new();
        let a = arena.alloc(Container::new_phantom());
        let b = arena.alloc(Container::new_phantom());
        let c = arena.alloc(Container::new_phantom());
        let d = arena.alloc(Container::new_phantom());
        arena.push_child(a, b);
        arena.push_child(b, c);
        (arena, [a, b, c, d])
    }

    #[test]
    fn test_no_cycle_simple_chain() {
        let (arena, [_, _, c, d]) = chain();
        assert!(!detect_cycle_in_ancestry(&arena, d, c));
    }

    #[test]
    fn test_cycle_through_ancestor() {
        let (arena, [a, b, c, _]) = chain();
        assert!(detect_cycle_in_ancestry(&arena, a, c));
        assert!(detect_cycle_in_ancestry(&arena, b, c));
    }

    #[test]
    fn test_self_link_is_cycle() {
        let (arena, [a, _, _, _]) = chain();
        assert!(detect_cycle_in_ancestry(&arena, a, a));
    }

    #[test]
    fn test_descendant_under_ancestor_is_fine() {
        let (arena, [a, _, c, _]) = chain();
        assert!(!detect_cycle_in_ancestry(&arena, c, a));
    }

    #[test]
    fn test_child_on_path() {
        let (arena, [a, b, c, d]) = chain();
        assert_eq!(child_on_path(&arena, a, c), Some(b));
        assert_eq!(child_on_path(&arena, b, c), Some(c));
        assert_eq!(child_on_path(&arena, c, a), None);
        assert_eq!(child_on_path(&arena, a, d), None);
        assert_eq!(child_on_path(&arena, a, a), None);
    }

    #[test]
    fn test_corrupt_parent_loop_terminates() {
        let mut arena: ContainerArena<()> = ContainerArena::new();
        let x = arena.alloc(Container::new_phantom());
        let y = arena.alloc(Container::new_phantom());
        let z = arena.alloc(Container::new_phantom());
        arena[x].parent = Some(y);
        arena[y].parent = Some(x);

        assert!(detect_cycle_in_ancestry(&arena, z, x));
    }
}
