//! Per-frame element arena.
//!
//! The layout pass appends one node per declaration. The interaction pass
//! walks the same declarations and looks each one up again, so nodes are
//! stored in declaration order and matched by scanning forward.

use sigil_shared::{HashedId, Rect, Vec2i};
use std::collections::HashMap;

/// What declared a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `start_group` / `end_group`.
    Group,
    /// `label`.
    Label,
    /// `image`.
    Image,
    /// `edit`.
    Edit,
    /// `custom_element`.
    Custom,
}

/// Geometry and flags of one declared element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Element id.
    pub hash: HashedId,
    /// Physical size measured in the layout pass.
    pub size: Vec2i,
    /// Content beyond the visible size (scroll groups).
    pub extra_size: Vec2i,
    /// Physical top-left, set in the interaction pass.
    pub position: Vec2i,
    /// Enclosing group's node.
    pub parent: Option<usize>,
    /// Registered with `check_event`.
    pub interactive: bool,
    /// Declaration kind.
    pub kind: ElementKind,
}

impl ElementNode {
    /// Screen rect from the interaction pass.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
}

/// Arena of this frame's elements.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    nodes: Vec<ElementNode>,
    by_id: HashMap<HashedId, usize>,
}

impl ElementRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all nodes, keeping allocations.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_id.clear();
    }

    /// Appends a node and returns its index. A repeated id takes over the
    /// id lookup.
    pub fn push(
        &mut self,
        hash: HashedId,
        size: Vec2i,
        parent: Option<usize>,
        kind: ElementKind,
    ) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(ElementNode {
            hash,
            size: size.clamp_non_negative(),
            extra_size: Vec2i::ZERO,
            position: Vec2i::ZERO,
            parent,
            interactive: false,
            kind,
        });
        if self.by_id.insert(hash, idx).is_some() {
            tracing::debug!("Duplicate element id {hash}; last declaration wins lookups");
        }
        idx
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by index.
    #[must_use]
    pub fn node(&self, idx: usize) -> Option<&ElementNode> {
        self.nodes.get(idx)
    }

    /// Mutable node by index.
    pub fn node_mut(&mut self, idx: usize) -> Option<&mut ElementNode> {
        self.nodes.get_mut(idx)
    }

    /// Index of the last node declared with `id`.
    #[must_use]
    pub fn find(&self, id: HashedId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// First node at or after `from` declared with `id`.
    #[must_use]
    pub fn find_from(&self, from: usize, id: HashedId) -> Option<usize> {
        self.nodes
            .get(from..)?
            .iter()
            .position(|n| n.hash == id)
            .map(|offset| from + offset)
    }

    /// Returns true if `ancestor` encloses `idx`, directly or not.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: usize, idx: usize) -> bool {
        let mut current = self.nodes.get(idx).and_then(|n| n.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes.get(parent).and_then(|n| n.parent);
        }
        false
    }

    /// Ids of interactive nodes, in declaration order.
    pub fn interactive(&self) -> impl Iterator<Item = (usize, HashedId)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.interactive)
            .map(|(i, n)| (i, n.hash))
    }

    /// Number of interactive nodes.
    #[must_use]
    pub fn interactive_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.interactive).count()
    }
}
