/// BVH node types.
///
/// Nodes reference each other through arena keys: a parent key pointing up
/// and, for internal nodes, two child keys pointing down.

use slotmap::new_key_type;
use super::volume::Volume;

new_key_type! {
    /// Stable key of a node inside a `NodeArena`.
    pub(crate) struct NodeKey;
}

/// Internal node (two children) or leaf (one payload).
#[derive(Debug)]
pub(crate) enum NodeKind<T> {
    Internal { children: [NodeKey; 2] },
    Leaf { data: T },
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    /// Leaf: the payload box. Internal: merge of both children.
    pub(crate) volume: Volume,
    /// `None` only for the root
    pub(crate) parent: Option<NodeKey>,
    /// Creation stamp, unique and increasing within one arena
    pub(crate) order: u64,
    pub(crate) kind: NodeKind<T>,
}

impl<T> Node<T> {
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub(crate) fn children(&self) -> Option<[NodeKey; 2]> {
        match self.kind {
            NodeKind::Internal { children } => Some(children),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut [NodeKey; 2]> {
        match &mut self.kind {
            NodeKind::Internal { children } => Some(children),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub(crate) fn data(&self) -> Option<&T> {
        match &self.kind {
            NodeKind::Leaf { data } => Some(data),
            NodeKind::Internal { .. } => None,
        }
    }

    pub(crate) fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.kind {
            NodeKind::Leaf { data } => Some(data),
            NodeKind::Internal { .. } => None,
        }
    }

    pub(crate) fn into_data(self) -> Option<T> {
        match self.kind {
            NodeKind::Leaf { data } => Some(data),
            NodeKind::Internal { .. } => None,
        }
    }
}
