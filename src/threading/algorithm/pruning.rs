//! Empty container pruning
//!
//! Removes phantoms that carry no information and promotes the children of
//! phantoms that do not need to exist:
//!
//! - phantom without children: removed
//! - phantom with children below the root level: replaced by its children
//! - phantom with a single child at the root level: replaced by that child
//! - phantom with two or more children at the root level: kept, it is the
//!   common ancestor nobody has seen
//!
//! Child lists are processed from an explicit work stack so deep threads cannot
//! exhaust the call stack.

use super::super::container::{ContainerArena, NodeId};
use super::super::stats::ThreadStats;

/// Prune the whole tree below `root`.
pub fn prune_empty_containers<R>(arena: &mut ContainerArena<R>, root: NodeId, stats: &mut ThreadStats) {
    let mut pending = vec![root];

    while let Some(owner) = pending.pop() {
        prune_child_list(arena, owner, &mut pending, stats);
    }
}

/// Prune the direct children of `owner`, queueing surviving containers that
/// have children of their own.
///
/// Children spliced in place of a phantom are examined next, in the same pass.
fn prune_child_list<R>(
    arena: &mut ContainerArena<R>,
    owner: NodeId,
    pending: &mut Vec<NodeId>,
    stats: &mut ThreadStats,
) {
    let mut prev: Option<NodeId> = None;
    let mut cursor = arena[owner].child;

    while let Some(current) = cursor {
        let next = arena[current].next;
        let container = &arena[current];

        if container.is_phantom() && container.child.is_none() {
            replace_link(arena, owner, prev, next);
            clear_links(arena, current);
            stats.pruned += 1;
            cursor = next;
            continue;
        }

        if let Some(kids) = container.child.filter(|&kids| {
            container.is_phantom()
                && (container.parent.is_some() || arena[kids].next.is_none())
        }) {
            let new_parent = container.parent;
            let tail = arena.reparent_chain(kids, new_parent);
            arena[tail].next = next;
            replace_link(arena, owner, prev, Some(kids));
            clear_links(arena, current);
            stats.promoted += 1;
            cursor = Some(kids);
            continue;
        }

        if container.child.is_some() {
            pending.push(current);
        }
        prev = Some(current);
        cursor = next;
    }
}

/// Point whatever preceded a removed container at `replacement`
fn replace_link<R>(
    arena: &mut ContainerArena<R>,
    owner: NodeId,
    prev: Option<NodeId>,
    replacement: Option<NodeId>,
) {
    match prev {
        None => arena[owner].child = replacement,
        Some(prev) => arena[prev].next = replacement,
    }
}

fn clear_links<R>(arena: &mut ContainerArena<R>, id: NodeId) {
    let container = &mut arena[id];
    container.parent = None;
    container.child = None;
    container.next = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threading::algorithm::root_set::find_root_set;
    use crate::threading::container::Container;

    fn real(arena: &mut ContainerArena<&'static str>, name: &'static str) -> NodeId {
        arena.alloc(Container::new_with_record(name))
    }

    fn phantom(arena: &mut ContainerArena<&'static str>) -> NodeId {
        arena.alloc(Container::new_phantom())
    }

    fn names(arena: &ContainerArena<&'static str>, owner: NodeId) -> Vec<&'static str> {
        arena
            .children(owner)
            .map(|id| arena[id].record.unwrap_or("<phantom>"))
            .collect()
    }

    #[test]
    fn test_childless_phantom_removed() {
        let mut arena = ContainerArena::new();
        let a = real(&mut arena, "a");
        let p = phantom(&mut arena);
        arena.push_child(a, p);
        let root = find_root_set(&mut arena);

        let mut stats = ThreadStats::default();
        prune_empty_containers(&mut arena, root, &mut stats);

        assert_eq!(names(&arena, root), vec!["a"]);
        assert_eq!(arena[a].child, None);
        assert_eq!(stats.pruned, 1);
    }

    #[test]
    fn test_nested_phantom_promotes_children() {
        // a → (phantom) → {b, c}
        let mut arena = ContainerArena::new();
        let a = real(&mut arena, "a");
        let p = phantom(&mut arena);
        let b = real(&mut arena, "b");
        let c = real(&mut arena, "c");
        arena.push_child(a, p);
        arena.push_child(p, c);
        arena.push_child(p, b);
        let root = find_root_set(&mut arena);

        let mut stats = ThreadStats::default();
        prune_empty_containers(&mut arena, root, &mut stats);

        assert_eq!(names(&arena, a), vec!["b", "c"]);
        assert_eq!(arena[b].parent, Some(a));
        assert_eq!(arena[c].parent, Some(a));
        assert_eq!(stats.promoted, 1);
    }

    #[test]
    fn test_root_phantom_with_one_child_promoted() {
        let mut arena = ContainerArena::new();
        let p = phantom(&mut arena);
        let b = real(&mut arena, "b");
        arena.push_child(p, b);
        let root = find_root_set(&mut arena);

        let mut stats = ThreadStats::default();
        prune_empty_containers(&mut arena, root, &mut stats);

        assert_eq!(names(&arena, root), vec!["b"]);
        assert_eq!(arena[b].parent, None);
    }

    #[test]
    fn test_root_phantom_with_two_children_kept() {
        let mut arena = ContainerArena::new();
        let p = phantom(&mut arena);
        let b = real(&mut arena, "b");
        let c = real(&mut arena, "c");
        arena.push_child(p, b);
        arena.push_child(p, c);
        let root = find_root_set(&mut arena);

        let mut stats = ThreadStats::default();
        prune_empty_containers(&mut arena, root, &mut stats);

        assert_eq!(names(&arena, root), vec!["<phantom>"]);
        assert_eq!(names(&arena, p), vec!["c", "b"]);
    }

    #[test]
    fn test_promoted_phantoms_are_reexamined() {
        // a → p1 → {p2 → b, p3 (empty)}
        let mut arena = ContainerArena::new();
        let a = real(&mut arena, "a");
        let p1 = phantom(&mut arena);
        let p2 = phantom(&mut arena);
        let p3 = phantom(&mut arena);
        let b = real(&mut arena, "b");
        arena.push_child(a, p1);
        arena.push_child(p1, p3);
        arena.push_child(p1, p2);
        arena.push_child(p2, b);
        let root = find_root_set(&mut arena);

        let mut stats = ThreadStats::default();
        prune_empty_containers(&mut arena, root, &mut stats);

        assert_eq!(names(&arena, a), vec!["b"]);
        assert_eq!(arena[b].parent, Some(a));
        assert_eq!(stats.promoted, 2);
        assert_eq!(stats.pruned, 1);
    }

    #[test]
    fn test_root_phantom_is_not_revisited_after_its_children_shrink() {
        // root phantom p → {p2 (empty), b}: p survives with a single child
        let mut arena = ContainerArena::new();
        let p = phantom(&mut arena);
        let p2 = phantom(&mut arena);
        let b = real(&mut arena, "b");
        arena.push_child(p, b);
        arena.push_child(p, p2);
        let root = find_root_set(&mut arena);

        let mut stats = ThreadStats::default();
        prune_empty_containers(&mut arena, root, &mut stats);

        assert_eq!(names(&arena, root), vec!["<phantom>"]);
        assert_eq!(names(&arena, p), vec!["b"]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut arena = ContainerArena::new();
        let mut parent = real(&mut arena, "top");
        for _ in 0..200_000 {
            let p = phantom(&mut arena);
            arena.push_child(parent, p);
            parent = p;
        }
        let leaf = real(&mut arena, "leaf");
        arena.push_child(parent, leaf);
        let root = find_root_set(&mut arena);

        let mut stats = ThreadStats::default();
        prune_empty_containers(&mut arena, root, &mut stats);

        assert_eq!(names(&arena, root), vec!["top"]);
        assert_eq!(stats.promoted, 200_000);
    }
}
