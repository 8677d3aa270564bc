use {
    crate::vnode::VNodeIdx,
    std::{collections::BTreeSet, ops::Index},
};

/// Insertion index of a server.
///
/// Indexes are handed out in registration order and are never reused, so
/// wherever we need to refer to a server (virtual node owner, reverse index)
/// we store the index instead of the server itself.
pub type ServerIdx = usize;

/// Server that claims virtual nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    name: String,
    idx: ServerIdx,
    vnodes: BTreeSet<VNodeIdx>,
}

impl Server {
    fn new(name: String, idx: ServerIdx) -> Self {
        Self {
            name,
            idx,
            vnodes: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insertion index of the server.
    pub fn idx(&self) -> ServerIdx {
        self.idx
    }

    /// Positions of the owned virtual nodes, in ascending order.
    pub fn virtual_nodes(&self) -> impl DoubleEndedIterator<Item = VNodeIdx> + '_ {
        self.vnodes.iter().copied()
    }

    /// Whether the server owns the virtual node at the given position.
    pub fn owns(&self, vnode: VNodeIdx) -> bool {
        self.vnodes.contains(&vnode)
    }

    /// Number of owned virtual nodes.
    pub fn len(&self) -> usize {
        self.vnodes.len()
    }

    /// Server owning no virtual nodes stays registered but receives no keys.
    pub fn is_empty(&self) -> bool {
        self.vnodes.is_empty()
    }
}

/// Servers collection.
///
/// Servers are kept in registration order. Names are not required to be
/// unique: lookups by name return the earliest registered match.
#[derive(Debug, Clone, Default)]
pub struct Servers(Vec<Server>);

impl Index<ServerIdx> for Servers {
    type Output = Server;

    fn index(&self, idx: ServerIdx) -> &Self::Output {
        &self.0[idx]
    }
}

impl Servers {
    /// Creates a new empty servers collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a server with no virtual nodes.
    ///
    /// Returns the index of the server in the collection.
    pub(crate) fn insert(&mut self, name: String) -> ServerIdx {
        let idx = self.0.len();
        self.0.push(Server::new(name, idx));
        idx
    }

    /// Returns index of the first server with the given name.
    ///
    /// This traverses the whole collection.
    pub fn idx(&self, name: &str) -> Option<ServerIdx> {
        self.0.iter().position(|server| server.name == name)
    }

    /// Returns a reference to the server with given index.
    pub fn get(&self, idx: ServerIdx) -> Option<&Server> {
        self.0.get(idx)
    }

    /// Returns the first server with the given name.
    pub fn find(&self, name: &str) -> Option<&Server> {
        self.idx(name).map(|idx| &self.0[idx])
    }

    /// Number of registered servers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterator over the servers, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Server> {
        self.0.iter()
    }

    /// Records that the server owns the virtual node.
    pub(crate) fn attach(&mut self, idx: ServerIdx, vnode: VNodeIdx) {
        let inserted = self.0[idx].vnodes.insert(vnode);
        debug_assert!(inserted, "virtual node {vnode} attached twice");
    }

    /// Removes the virtual node from the server's ownership.
    pub(crate) fn detach(&mut self, idx: ServerIdx, vnode: VNodeIdx) {
        let removed = self.0[idx].vnodes.remove(&vnode);
        debug_assert!(removed, "virtual node {vnode} not owned by server {idx}");
    }
}
