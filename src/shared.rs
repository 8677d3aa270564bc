use {
    crate::{
        Cluster,
        ClusterResult,
        ring::{ConsistentRing, HashRing},
        server::{Server, ServerIdx},
    },
    parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    std::sync::Arc,
};

/// Cluster shared between threads.
///
/// Mutations (server registration, splits) hold the lock exclusively, while
/// lookups share it. Cloning the handle shares the same cluster.
#[derive(Debug)]
pub struct SharedCluster<R: HashRing = ConsistentRing>(Arc<RwLock<Cluster<R>>>);

impl<R: HashRing> Clone for SharedCluster<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R: HashRing> From<Cluster<R>> for SharedCluster<R> {
    fn from(cluster: Cluster<R>) -> Self {
        Self::new(cluster)
    }
}

impl<R: HashRing> SharedCluster<R> {
    pub fn new(cluster: Cluster<R>) -> Self {
        Self(Arc::new(RwLock::new(cluster)))
    }

    /// See [`Cluster::add_server()`].
    pub fn add_server(&self, name: impl Into<String>, range: &str) -> ClusterResult<ServerIdx> {
        self.0.write().add_server(name, range)
    }

    /// See [`Cluster::split()`].
    pub fn split(&self, existing: &str, new: impl Into<String>) -> ClusterResult<()> {
        self.0.write().split(existing, new)
    }

    /// Name of the server responsible for the key, see [`Cluster::server()`].
    pub fn server(&self, key: &str) -> Option<String> {
        self.0.read().server(key).map(str::to_string)
    }

    /// Snapshot of the first server registered under the name.
    pub fn server_info(&self, name: &str) -> Option<Server> {
        self.0.read().server_info(name).cloned()
    }

    /// Locks the cluster for reading.
    ///
    /// Mutations wait until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, Cluster<R>> {
        self.0.read()
    }

    /// Locks the cluster for exclusive access.
    pub fn write(&self) -> RwLockWriteGuard<'_, Cluster<R>> {
        self.0.write()
    }
}
