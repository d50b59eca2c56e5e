//! Tree traversal utilities for email threading
//!
//! All walks use an explicit stack to avoid stack overflow on deeply nested
//! threads.

use super::super::container::{ContainerArena, NodeId};

/// Collect the containers of a sibling chain and all their descendants in
/// depth-first pre-order.
///
/// Starting at `first`, every container is listed before its children, and its
/// children before its next sibling.
///
/// Panics if the walk visits more containers than the arena holds, which means
/// the child/next links contain a loop.
pub fn preorder<R>(arena: &ContainerArena<R>, first: Option<NodeId>) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut traversal_stack: Vec<NodeId> = first.into_iter().collect();

    while let Some(current) = traversal_stack.pop() {
        order.push(current);
        assert!(
            order.len() <= arena.len(),
            "container links loop back on themselves near {current:?}"
        );

        // Next sibling goes below the first child so the child is visited first
        if let Some(next) = arena[current].next {
            traversal_stack.push(next);
        }
        if let Some(child) = arena[current].child {
            traversal_stack.push(child);
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threading::container::Container;

    #[test]
    fn test_preorder_children_before_siblings() {
        // A → {B → C, D}
        let mut arena = ContainerArena::new();
        let a = arena.alloc(Container::new_with_record("A"));
        let b = arena.alloc(Container::new_with_record("B"));
        let c = arena.alloc(Container::new_with_record("C"));
        let d = arena.alloc(Container::new_with_record("D"));
        arena.push_child(a, d);
        arena.push_child(a, b);
        arena.push_child(b, c);

        assert_eq!(preorder(&arena, Some(a)), vec![a, b, c, d]);
    }

    #[test]
    fn test_preorder_empty() {
        let arena: ContainerArena<()> = ContainerArena::new();
        assert!(preorder(&arena, None).is_empty());
    }

    #[test]
    #[should_panic(expected = "loop back")]
    fn test_preorder_detects_sibling_loop() {
        let mut arena: ContainerArena<()> = ContainerArena::new();
        let a = arena.alloc(Container::new_phantom());
        let b = arena.alloc(Container::new_phantom());
        arena[a].next = Some(b);
        arena[b].next = Some(a);
        preorder(&arena, Some(a));
    }
}
