//! Server membership over a fixed set of consistent-hashing virtual nodes.
//!
//! Keys are hashed onto a fixed number of virtual nodes, and servers claim
//! contiguous ranges of those virtual nodes. Because the set of virtual nodes
//! never changes, reshaping the server pool (adding a server over a range,
//! splitting a server in two) only moves the keys of the virtual nodes that
//! change hands.
//!
//! ```
//! use vnode_cluster::Cluster;
//!
//! let mut cluster = Cluster::new(100)?;
//! cluster.add_server("server1", "0-49")?;
//! cluster.add_server("server2", "50-99")?;
//! assert!(cluster.server("some key").is_some());
//!
//! // Upper half of server1 goes to server1a.
//! cluster.split("server1", "server1a")?;
//! assert_eq!(cluster.server_info("server1a").map(|s| s.len()), Some(25));
//! # Ok::<(), vnode_cluster::ClusterError>(())
//! ```

mod builder;
mod cluster;
mod error;
mod hash;
mod range;
mod ring;
mod server;
mod shared;
mod vnode;

pub use {
    builder::ClusterBuilder,
    cluster::Cluster,
    error::{ClusterError, ClusterResult},
    hash::DefaultHasher,
    range::parse_range,
    ring::{ConsistentRing, DEFAULT_POINTS_PER_NODE, HashRing},
    server::{Server, ServerIdx, Servers},
    shared::SharedCluster,
    vnode::{VNodeIdx, VirtualNode, VirtualNodes},
};
