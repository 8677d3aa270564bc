use {
    crate::server::ServerIdx,
    std::ops::{Index, Range},
};

/// Position of a virtual node, `0..N`.
pub type VNodeIdx = usize;

/// Virtual node.
///
/// A virtual node is the unit of ownership: keys are hashed onto virtual
/// nodes by the ring, and servers claim virtual nodes. Identity (position and
/// name) never changes, only the owner does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualNode {
    idx: VNodeIdx,
    name: String,
    owner: Option<ServerIdx>,
}

impl VirtualNode {
    fn new(idx: VNodeIdx) -> Self {
        Self {
            idx,
            name: idx.to_string(),
            owner: None,
        }
    }

    /// Position of the virtual node.
    pub fn idx(&self) -> VNodeIdx {
        self.idx
    }

    /// Stable name, the decimal representation of the position.
    ///
    /// This is the name the ring knows the virtual node by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the owning server, if any.
    pub fn owner(&self) -> Option<ServerIdx> {
        self.owner
    }
}

/// Fixed set of virtual nodes, allocated once at cluster construction.
#[derive(Debug, Clone)]
pub struct VirtualNodes(Vec<VirtualNode>);

impl Index<VNodeIdx> for VirtualNodes {
    type Output = VirtualNode;

    fn index(&self, idx: VNodeIdx) -> &Self::Output {
        &self.0[idx]
    }
}

impl VirtualNodes {
    /// Allocates `count` unowned virtual nodes.
    pub fn new(count: usize) -> Self {
        Self((0..count).map(VirtualNode::new).collect())
    }

    /// Number of virtual nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Positions of all virtual nodes.
    pub fn positions(&self) -> Range<VNodeIdx> {
        0..self.0.len()
    }

    pub fn get(&self, idx: VNodeIdx) -> Option<&VirtualNode> {
        self.0.get(idx)
    }

    /// Stable names, in position order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(VirtualNode::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VirtualNode> {
        self.0.iter()
    }

    /// Hands the virtual node over to a new owner.
    ///
    /// Returns the previous owner, which the caller must evict the node from.
    pub(crate) fn assign(&mut self, idx: VNodeIdx, owner: ServerIdx) -> Option<ServerIdx> {
        self.0[idx].owner.replace(owner)
    }
}
