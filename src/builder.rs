use {
    super::{
        Cluster,
        ClusterError,
        ClusterResult,
        hash::DefaultHasher,
        ring::{ConsistentRing, DEFAULT_POINTS_PER_NODE, HashRing},
        vnode::VirtualNodes,
    },
    std::hash::{BuildHasher, BuildHasherDefault},
};

/// Cluster builder.
///
/// The number of virtual nodes is fixed once the cluster is built. By default
/// keys are hashed onto a [`ConsistentRing`]; its density and hasher can be
/// tuned, or a different ring can be supplied with
/// [`build_with_ring()`](Self::build_with_ring).
pub struct ClusterBuilder<H: BuildHasher = BuildHasherDefault<DefaultHasher>> {
    virtual_nodes: usize,
    points_per_node: usize,
    build_hasher: H,
}

impl ClusterBuilder {
    /// Create new cluster builder.
    pub fn new(virtual_nodes: usize) -> Self {
        Self {
            virtual_nodes,
            points_per_node: DEFAULT_POINTS_PER_NODE,
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<H: BuildHasher> ClusterBuilder<H> {
    /// Number of points each virtual node places on the default ring.
    pub fn with_points_per_node(mut self, points_per_node: usize) -> Self {
        self.points_per_node = points_per_node;
        self
    }

    /// Transform the builder into one hashing with a different hasher.
    pub fn with_build_hasher<CustomH: BuildHasher>(self, build_hasher: CustomH) -> ClusterBuilder<CustomH> {
        ClusterBuilder {
            virtual_nodes: self.virtual_nodes,
            points_per_node: self.points_per_node,
            build_hasher,
        }
    }

    /// Build the cluster on the default ring.
    pub fn build(self) -> ClusterResult<Cluster<ConsistentRing<H>>> {
        let vnodes = self.allocate_vnodes()?;
        let ring = ConsistentRing::with_build_hasher(vnodes.names(), self.points_per_node, self.build_hasher)?;
        Ok(Cluster::from_parts(vnodes, ring))
    }

    /// Build the cluster on a custom ring.
    ///
    /// The closure receives the names of the virtual nodes, in position order,
    /// and must return a ring over exactly these names.
    pub fn build_with_ring<R, F>(self, make_ring: F) -> ClusterResult<Cluster<R>>
    where
        R: HashRing,
        F: FnOnce(&[String]) -> R,
    {
        let vnodes = self.allocate_vnodes()?;
        let names: Vec<String> = vnodes.names().map(str::to_string).collect();
        let ring = make_ring(&names);
        Ok(Cluster::from_parts(vnodes, ring))
    }

    fn allocate_vnodes(&self) -> ClusterResult<VirtualNodes> {
        if self.virtual_nodes == 0 {
            return Err(ClusterError::NoVirtualNodes);
        }
        Ok(VirtualNodes::new(self.virtual_nodes))
    }
}
