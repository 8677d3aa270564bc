use {
    crate::{
        ClusterError,
        ClusterResult,
        builder::ClusterBuilder,
        range::parse_range,
        ring::{ConsistentRing, HashRing},
        server::{Server, ServerIdx, Servers},
        vnode::{VNodeIdx, VirtualNode, VirtualNodes},
    },
    rapidhash::RapidHashMap,
    std::ops::RangeInclusive,
    tracing::{debug, trace},
};

/// Cluster of servers sharing a fixed set of virtual nodes.
///
/// Keys are hashed by the ring onto virtual nodes, and every virtual node is
/// owned by at most one server. Servers claim contiguous ranges of virtual
/// nodes; a claim evicts whatever server owned the range before, so only keys
/// on the claimed virtual nodes change servers.
///
/// The cluster is not synchronized: mutations take `&mut self`. Use
/// [`SharedCluster`](crate::SharedCluster) to share it between threads.
#[derive(Debug)]
pub struct Cluster<R: HashRing = ConsistentRing> {
    ring: R,
    vnodes: VirtualNodes,
    servers: Servers,
    /// Virtual node name -> owning server.
    owners: RapidHashMap<String, ServerIdx>,
}

impl Cluster {
    /// Creates a cluster of `virtual_nodes` virtual nodes on the default ring.
    pub fn new(virtual_nodes: usize) -> ClusterResult<Self> {
        ClusterBuilder::new(virtual_nodes).build()
    }
}

impl<R: HashRing> Cluster<R> {
    /// Assembles a cluster from virtual nodes and a ring built over their
    /// names.
    pub(crate) fn from_parts(vnodes: VirtualNodes, ring: R) -> Self {
        debug!(virtual_nodes = vnodes.len(), "created cluster");
        Self {
            ring,
            vnodes,
            servers: Servers::new(),
            owners: RapidHashMap::default(),
        }
    }

    /// Number of virtual nodes, fixed at construction.
    pub fn virtual_node_count(&self) -> usize {
        self.vnodes.len()
    }

    /// Ring the keys are hashed on.
    pub fn ring(&self) -> &R {
        &self.ring
    }

    /// Registers a new server claiming the virtual nodes of `range`.
    ///
    /// The range is an inclusive `start-end` expression. Virtual nodes in the
    /// range which are owned by other servers are evicted from them. The
    /// server name is not checked for uniqueness.
    ///
    /// Returns the index of the new server. On error nothing is changed.
    pub fn add_server(&mut self, name: impl Into<String>, range: &str) -> ClusterResult<ServerIdx> {
        let (start, end) = parse_range(range)?;
        let range = self.validate(start, end)?;
        Ok(self.claim(name.into(), range))
    }

    /// Returns the name of the server responsible for the given key.
    ///
    /// `None` means the key hashes onto a virtual node no server has claimed.
    pub fn server(&self, key: &str) -> Option<&str> {
        let vnode = self.ring.node(key)?;
        self.owners
            .get(vnode)
            .map(|idx| self.servers[*idx].name())
    }

    /// Returns the first registered server with the given name.
    pub fn server_info(&self, name: &str) -> Option<&Server> {
        self.servers.find(name)
    }

    /// Moves the upper half of a server's virtual nodes to a new server.
    ///
    /// With `n` virtual nodes owned, the new server claims those from the
    /// `n / 2`-th (in position order) to the last one, the existing server
    /// keeps the rest. Ownership is expected to be contiguous: for a
    /// fragmented server the whole span between those two virtual nodes is
    /// claimed, including virtual nodes of other servers in between.
    ///
    /// Splitting a server without virtual nodes is a no-op.
    pub fn split(&mut self, existing: &str, new: impl Into<String>) -> ClusterResult<()> {
        let server = self
            .server_info(existing)
            .ok_or_else(|| ClusterError::ServerNotFound(existing.to_string()))?;

        let half = server.len() / 2;
        let (Some(start), Some(end)) = (server.virtual_nodes().nth(half), server.virtual_nodes().next_back())
        else {
            debug!(server = existing, "nothing to split");
            return Ok(());
        };

        let from = server.idx();
        let new = new.into();
        debug!(server = existing, from, new = %new, start, end, "splitting server");
        self.claim(new, start..=end);
        Ok(())
    }

    /// Iterator over the servers, in registration order.
    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.iter()
    }

    pub fn virtual_node(&self, idx: VNodeIdx) -> Option<&VirtualNode> {
        self.vnodes.get(idx)
    }

    /// Server owning the virtual node at the given position.
    pub fn owner(&self, idx: VNodeIdx) -> Option<&Server> {
        self.vnodes
            .get(idx)
            .and_then(VirtualNode::owner)
            .map(|owner| &self.servers[owner])
    }

    /// Positions of virtual nodes no server owns.
    pub fn unowned(&self) -> impl Iterator<Item = VNodeIdx> + '_ {
        self.vnodes
            .iter()
            .filter(|vnode| vnode.owner().is_none())
            .map(VirtualNode::idx)
    }

    fn validate(&self, start: i64, end: i64) -> ClusterResult<RangeInclusive<VNodeIdx>> {
        let count = self.vnodes.len();
        let invalid = || ClusterError::InvalidRange { start, end, count };

        if start > end {
            return Err(invalid());
        }
        let start = usize::try_from(start).map_err(|_| invalid())?;
        let end = usize::try_from(end).map_err(|_| invalid())?;
        if end >= count {
            return Err(invalid());
        }
        Ok(start..=end)
    }

    /// Registers a server and hands it the virtual nodes of a validated range.
    fn claim(&mut self, name: String, range: RangeInclusive<VNodeIdx>) -> ServerIdx {
        let idx = self.servers.insert(name);

        let mut evicted = 0;
        for vnode in range.clone() {
            if let Some(prev) = self.vnodes.assign(vnode, idx) {
                trace!(vnode, from = prev, to = idx, "evicting virtual node");
                self.servers.detach(prev, vnode);
                evicted += 1;
            }
            self.servers.attach(idx, vnode);
            self.owners.insert(self.vnodes[vnode].name().to_string(), idx);
        }

        debug!(
            server = self.servers[idx].name(),
            idx,
            start = range.start(),
            end = range.end(),
            evicted,
            "server claimed virtual nodes"
        );
        idx
    }

    /// Checks that virtual node owners, server ownership and the reverse
    /// index agree.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        for vnode in self.vnodes.iter() {
            let holders: Vec<_> = self
                .servers
                .iter()
                .filter(|server| server.owns(vnode.idx()))
                .map(Server::idx)
                .collect();
            match vnode.owner() {
                Some(owner) => assert_eq!(holders, [owner], "vnode {}", vnode.idx()),
                None => assert!(holders.is_empty(), "vnode {}", vnode.idx()),
            }
            assert_eq!(self.owners.get(vnode.name()).copied(), vnode.owner());
        }
    }
}
