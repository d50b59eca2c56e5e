//! Container arena for the JWZ threading algorithm
//!
//! The JWZ algorithm uses a "container" abstraction to represent both real messages
//! and "phantom" messages (messages referenced but not present in the input).
//!
//! Containers live in a single growable table and refer to each other through
//! [`NodeId`] handles. Together the `child` and `next` links encode a
//! first-child/next-sibling tree; `parent` points back up.

use std::ops::{Index, IndexMut};

/// Handle to a container inside a [`ContainerArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of this container in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Key used in the identity index while building containers.
///
/// Duplicate identities are tracked under a `Bogus` key so every occurrence keeps
/// its own container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerKey<Id> {
    Message(Id),
    Bogus(u64),
}

/// A node in the thread tree.
///
/// ## Phantom Containers
///
/// A container without a record is a phantom: it stands in for a message that
/// was referenced but never seen. Phantoms are pruned or promoted away unless
/// they are the only common ancestor of several messages.
#[derive(Debug)]
pub struct Container<R> {
    /// The caller's record (None for phantoms)
    pub record: Option<R>,

    /// Parent container (None for root set members)
    pub parent: Option<NodeId>,

    /// First child
    pub child: Option<NodeId>,

    /// Next sibling
    pub next: Option<NodeId>,
}

impl<R> Container<R> {
    /// Create a new container for a real record
    pub fn new_with_record(record: R) -> Self {
        Container {
            record: Some(record),
            parent: None,
            child: None,
            next: None,
        }
    }

    /// Create a new phantom container (for referenced but missing records)
    pub fn new_phantom() -> Self {
        Container {
            record: None,
            parent: None,
            child: None,
            next: None,
        }
    }

    pub fn is_phantom(&self) -> bool {
        self.record.is_none()
    }
}

/// Owning table of every container created during one threading run.
#[derive(Debug)]
pub struct ContainerArena<R> {
    containers: Vec<Container<R>>,
}

impl<R> Default for ContainerArena<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ContainerArena<R> {
    pub fn new() -> Self {
        ContainerArena {
            containers: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ContainerArena {
            containers: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Store a container and return its handle
    pub fn alloc(&mut self, container: Container<R>) -> NodeId {
        let id = NodeId(self.containers.len());
        self.containers.push(container);
        id
    }

    /// All handles in allocation order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<R> {
        (0..self.containers.len()).map(NodeId)
    }

    /// Iterate the direct children of `id`, first child first
    pub fn children(&self, id: NodeId) -> Children<'_, R> {
        Children {
            arena: self,
            cursor: self[id].child,
        }
    }

    /// Last container in the child list of `id`
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last()
    }

    /// Link `node` in front of `owner`'s child list.
    ///
    /// `parent` is what `node` records as its parent. Root set members are
    /// linked under the synthetic root with `parent = None`.
    pub fn insert_first(&mut self, owner: NodeId, node: NodeId, parent: Option<NodeId>) {
        debug_assert!(self[node].next.is_none(), "{node:?} is still linked");
        let first = self[owner].child;
        let container = &mut self[node];
        container.parent = parent;
        container.next = first;
        self[owner].child = Some(node);
    }

    /// Make `child` the first child of `parent`
    pub fn push_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_first(parent, child, Some(parent));
    }

    /// Remove `child` from its parent's child list.
    ///
    /// Panics if the parent does not list `child`: the links are corrupt.
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self[child].parent else {
            return;
        };

        let mut prev: Option<NodeId> = None;
        let mut cursor = self[parent].child;
        while let Some(current) = cursor {
            if current == child {
                break;
            }
            prev = Some(current);
            cursor = self[current].next;
        }

        if cursor.is_none() {
            panic!("didn't find {child:?} in the child list of its parent {parent:?}");
        }

        let rest = self[child].next;
        match prev {
            None => self[parent].child = rest,
            Some(prev) => self[prev].next = rest,
        }

        let container = &mut self[child];
        container.next = None;
        container.parent = None;
    }

    /// Point every container of the sibling chain starting at `first` to `parent`.
    ///
    /// Returns the last container of the chain.
    pub fn reparent_chain(&mut self, first: NodeId, parent: Option<NodeId>) -> NodeId {
        let mut tail = first;
        loop {
            self[tail].parent = parent;
            match self[tail].next {
                Some(next) => tail = next,
                None => return tail,
            }
        }
    }
}

impl<R> Index<NodeId> for ContainerArena<R> {
    type Output = Container<R>;

    fn index(&self, id: NodeId) -> &Container<R> {
        &self.containers[id.0]
    }
}

impl<R> IndexMut<NodeId> for ContainerArena<R> {
    fn index_mut(&mut self, id: NodeId) -> &mut Container<R> {
        &mut self.containers[id.0]
    }
}

/// Iterator over a sibling chain.
pub struct Children<'a, R> {
    arena: &'a ContainerArena<R>,
    cursor: Option<NodeId>,
}

impl<R> Iterator for Children<'_, R> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.cursor?;
        self.cursor = self.arena[current].next;
        Some(current)
    }
}
