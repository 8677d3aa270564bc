use {
    crate::{ClusterError, ClusterResult, hash::DefaultHasher},
    auto_impl::auto_impl,
    std::{
        collections::BTreeMap,
        hash::{BuildHasher, BuildHasherDefault},
    },
};

/// Number of points each node places on the ring by default.
pub const DEFAULT_POINTS_PER_NODE: usize = 40;

/// Consistent hash ring over a fixed set of node names.
///
/// The cluster builds the ring once, over the stable names of its virtual
/// nodes, and afterwards only asks it which name owns a key. Lookups must be
/// deterministic: for the same set of names and the same key, the same name is
/// returned.
#[auto_impl(&, Box, Arc)]
pub trait HashRing {
    /// Returns the name of the node owning the given key.
    ///
    /// `None` is only returned by a ring that has no nodes.
    fn node(&self, key: &str) -> Option<&str>;

    /// Number of nodes on the ring.
    fn len(&self) -> usize;

    /// Whether the ring has no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classic consistent hash ring.
///
/// Every node is hashed onto a `u64` circle several times (points), and a key
/// is owned by the node of the first point at or after the key's hash,
/// wrapping around at the end of the circle. Adding a node to the set only
/// moves keys onto that node.
#[derive(Debug, Clone)]
pub struct ConsistentRing<H: BuildHasher = BuildHasherDefault<DefaultHasher>> {
    /// Ring position -> index into `names`.
    points: BTreeMap<u64, usize>,
    names: Vec<String>,
    build_hasher: H,
}

impl ConsistentRing {
    /// Builds a ring with [`DEFAULT_POINTS_PER_NODE`] points per node.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(names, DEFAULT_POINTS_PER_NODE, BuildHasherDefault::default())
    }

    /// Builds a ring with the given number of points per node.
    pub fn with_points<I, S>(names: I, points_per_node: usize) -> ClusterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_build_hasher(names, points_per_node, BuildHasherDefault::default())
    }
}

impl<H: BuildHasher> ConsistentRing<H> {
    /// Builds a ring hashing keys and points with the given hasher.
    pub fn with_build_hasher<I, S>(
        names: I,
        points_per_node: usize,
        build_hasher: H,
    ) -> ClusterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if points_per_node == 0 {
            return Err(ClusterError::NoRingPoints);
        }
        Ok(Self::build(names, points_per_node, build_hasher))
    }

    fn build<I, S>(names: I, points_per_node: usize, build_hasher: H) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut points = BTreeMap::new();
        for (idx, name) in names.iter().enumerate() {
            for point in 0..points_per_node {
                // On collision the earlier node keeps the point, so the
                // result does not depend on anything but the node order.
                points
                    .entry(build_hasher.hash_one((name.as_str(), point as u64)))
                    .or_insert(idx);
            }
        }

        Self {
            points,
            names,
            build_hasher,
        }
    }

    /// Position of a key on the ring.
    pub fn position(&self, key: &str) -> u64 {
        self.build_hasher.hash_one(key)
    }

    /// Names of the nodes, in construction order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<H: BuildHasher> HashRing for ConsistentRing<H> {
    fn node(&self, key: &str) -> Option<&str> {
        let pos = self.position(key);
        self.points
            .range(pos..)
            .chain(self.points.range(..pos))
            .next()
            .map(|(_, idx)| self.names[*idx].as_str())
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}
