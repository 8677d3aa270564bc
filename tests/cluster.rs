use {
    std::collections::{HashMap, HashSet},
    vnode_cluster::{Cluster, ClusterError, HashRing, Server},
};

fn cluster_with(count: usize, servers: &[(&str, &str)]) -> Cluster {
    let mut cluster = Cluster::new(count).expect("Failed to create cluster");
    for (name, range) in servers {
        cluster.add_server(*name, range).expect("Failed to add server");
    }
    cluster
}

fn assignments(cluster: &Cluster, keys: &[String]) -> Vec<Option<String>> {
    keys.iter()
        .map(|key| cluster.server(key).map(str::to_string))
        .collect()
}

#[test]
fn end_to_end() {
    let cluster = cluster_with(100, &[("server1", "0-49"), ("server2", "49-99")]);

    let server1 = cluster.server_info("server1").unwrap();
    let server2 = cluster.server_info("server2").unwrap();
    assert_eq!(server1.virtual_nodes().collect::<Vec<_>>(), (0..=48).collect::<Vec<_>>());
    assert_eq!(server2.virtual_nodes().collect::<Vec<_>>(), (49..=99).collect::<Vec<_>>());
    assert_eq!(cluster.owner(49).map(Server::name), Some("server2"));

    // Both servers receive a share of the keys.
    let mut counts = HashMap::<&str, usize>::new();
    for i in 0..1000 {
        *counts.entry(cluster.server(&i.to_string()).unwrap()).or_default() += 1;
    }
    assert_eq!(counts.len(), 2);
}

#[test]
fn range_validation() {
    let mut cluster = Cluster::new(100).unwrap();
    for range in ["99-0", "0-1000", "100-100", "0-100"] {
        assert!(
            matches!(cluster.add_server("server1", range), Err(ClusterError::InvalidRange { .. })),
            "range {range} should be rejected"
        );
    }
    assert!(matches!(
        cluster.add_server("server1", " 0 - x "),
        Err(ClusterError::InvalidInput(_))
    ));
    assert!(cluster.add_server("server1", "0-99").is_ok());
}

#[test]
fn lookups_are_deterministic() {
    let cluster = cluster_with(100, &[("server1", "0-49"), ("server2", "50-99")]);
    let keys: Vec<String> = (0..1000).map(|i| format!("user:{i}")).collect();

    let first = assignments(&cluster, &keys);
    let second = assignments(&cluster, &keys);
    assert_eq!(first, second);

    // Same layout in a fresh cluster resolves identically.
    let other = cluster_with(100, &[("server1", "0-49"), ("server2", "50-99")]);
    assert_eq!(assignments(&other, &keys), first);
}

#[test]
fn unclaimed_virtual_nodes_route_nowhere() {
    let cluster = cluster_with(100, &[("server1", "0-9")]);
    let keys: Vec<String> = (0..1000).map(|i| i.to_string()).collect();

    let routed = assignments(&cluster, &keys);
    assert!(routed.iter().any(Option::is_none));
    assert!(routed.iter().flatten().all(|name| name == "server1"));
    assert_eq!(cluster.unowned().count(), 90);
}

#[test]
fn claim_only_moves_claimed_keys() {
    let mut cluster = cluster_with(100, &[("a", "0-33"), ("b", "34-66"), ("c", "67-99")]);
    let keys: Vec<String> = (0..2000).map(|i| format!("k{i}")).collect();
    let before = assignments(&cluster, &keys);

    cluster.add_server("d", "20-40").unwrap();
    let moved: HashSet<usize> = (20..=40).collect();

    for (key, old) in keys.iter().zip(before) {
        let vnode = ring_node(&cluster, key);
        let new = cluster.server(key).map(str::to_string);
        if moved.contains(&vnode) {
            assert_eq!(new.as_deref(), Some("d"));
        } else {
            assert_eq!(new, old, "key {key} on untouched virtual node {vnode} moved");
        }
    }
}

#[test]
fn split_locality() {
    let mut cluster = cluster_with(150, &[("server1", "0-49"), ("server2", "50-99"), ("server3", "100-149")]);
    let keys: Vec<String> = (0..1000).map(|i| i.to_string()).collect();
    let before = assignments(&cluster, &keys);

    cluster.split("server1", "server1a").unwrap();
    let after = assignments(&cluster, &keys);

    let mut moved = 0;
    for (old, new) in before.iter().zip(&after) {
        if old != new {
            assert_eq!(old.as_deref(), Some("server1"), "Hitting other servers");
            assert_eq!(new.as_deref(), Some("server1a"), "Shifted to wrong server");
            moved += 1;
        }
    }
    assert!(moved > 0, "no key moved to server1a");

    for name in ["server1", "server1a"] {
        let server = cluster.server_info(name).unwrap();
        assert_eq!(server.len(), 25);
        for vnode in server.virtual_nodes() {
            assert_eq!(cluster.owner(vnode).map(Server::idx), Some(server.idx()));
        }
    }
}

#[test]
fn repeated_splits() {
    let mut cluster = cluster_with(64, &[("s", "0-63")]);
    cluster.split("s", "s1").unwrap();
    cluster.split("s", "s2").unwrap();
    cluster.split("s1", "s3").unwrap();

    let owned = |name: &str| cluster.server_info(name).unwrap().virtual_nodes().collect::<Vec<_>>();
    assert_eq!(owned("s"), (0..16).collect::<Vec<_>>());
    assert_eq!(owned("s2"), (16..32).collect::<Vec<_>>());
    assert_eq!(owned("s1"), (32..48).collect::<Vec<_>>());
    assert_eq!(owned("s3"), (48..64).collect::<Vec<_>>());
    assert_eq!(
        cluster.servers().map(|s| (s.name(), s.idx())).collect::<Vec<_>>(),
        [("s", 0), ("s1", 1), ("s2", 2), ("s3", 3)]
    );
}

/// Position of the virtual node the key hashes onto.
fn ring_node(cluster: &Cluster, key: &str) -> usize {
    cluster
        .ring()
        .node(key)
        .and_then(|name| name.parse().ok())
        .expect("ring returned a foreign node")
}
