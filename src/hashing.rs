//! Deterministic key hashing for [`KeyedStore`](crate::store::KeyedStore)
//!
//! The standard library's `RandomState` is seeded per process, so bucket
//! placement would differ between runs. Bucket statistics are reported to
//! callers and compared in tests, so the default hasher here is unseeded:
//! equal keys land in the same bucket in every instance and every run.

use std::hash::{BuildHasher, Hasher};

/// Streams the key's `Hash` bytes through Blake3 and folds the digest to 64 bits
#[derive(Clone, Default)]
pub struct Blake3Hasher {
    inner: blake3::Hasher,
}

impl Hasher for Blake3Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn finish(&self) -> u64 {
        let digest = self.inner.finalize();
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(word)
    }
}

/// Default `BuildHasher` for keyed stores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3BuildHasher;

impl BuildHasher for Blake3BuildHasher {
    type Hasher = Blake3Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Blake3Hasher::default()
    }
}
