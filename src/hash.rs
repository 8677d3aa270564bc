use {rapidhash::v3::rapidhash_v3, std::hash::Hasher};

/// Default hasher for the ring.
///
/// This uses the rapidhash V3 algorithm for hashing keys and ring points.
/// For C++ compatibility, relies on the default seed and secrets.
///
/// The output is portable across platforms and major releases, so keys land
/// on the same virtual nodes no matter where the cluster is built.
#[derive(Default)]
pub struct DefaultHasher(Vec<u8>);

impl Hasher for DefaultHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    fn finish(&self) -> u64 {
        rapidhash_v3(&self.0)
    }
}
