//! Fixed-capacity chaining hash table
//!
//! `KeyedStore` is the primary key/value store for voters, candidates and
//! votes. Each bucket is an ordered chain of `(key, value)` pairs and the
//! bucket count is fixed when the store is built: there is no rehashing,
//! so the load factor grows without bound as entries are added and chains
//! degrade towards linear scans. Size the store for the expected data.

use crate::hashing::Blake3BuildHasher;
use crate::{Result, validation_error};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Structural statistics of a [`KeyedStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of distinct keys
    pub count: usize,
    /// Fixed bucket count
    pub capacity: usize,
    /// `count / capacity`
    pub load_factor: f64,
    /// Inserts of a new key into an already non-empty bucket
    pub collisions: usize,
    /// Longest chain across all buckets
    pub max_chain_length: usize,
    pub empty_bucket_count: usize,
    /// Fraction of buckets holding at least one entry, in `[0, 1]`
    pub utilization: f64,
}

/// Separate-chaining hash table with a construction-time bucket count
#[derive(Debug, Clone)]
pub struct KeyedStore<K, V, S = Blake3BuildHasher> {
    buckets: Vec<Vec<(K, V)>>,
    count: usize,
    collision_count: usize,
    hasher: S,
}

impl<K, V> KeyedStore<K, V> {
    /// Create a store with `capacity` buckets and the default deterministic hasher
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, Blake3BuildHasher)
    }
}

impl<K, V, S> KeyedStore<K, V, S> {
    /// Create a store with `capacity` buckets and a caller-supplied hasher
    ///
    /// A zero capacity has no bucket to map keys into and is rejected.
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity == 0 {
            return Err(validation_error!("capacity must be at least 1"));
        }

        tracing::debug!(capacity, "keyed store created");

        Ok(Self {
            buckets: (0..capacity).map(|_| Vec::new()).collect(),
            count: 0,
            collision_count: 0,
            hasher,
        })
    }

    /// Number of distinct keys stored
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fixed bucket count
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn collision_count(&self) -> usize {
        self.collision_count
    }

    /// Items per bucket
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    /// Iterate over all entries in bucket order, then chain order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    /// Collect table statistics
    pub fn stats(&self) -> StoreStats {
        let capacity = self.buckets.len();
        let max_chain_length = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        let empty_bucket_count = self.buckets.iter().filter(|b| b.is_empty()).count();

        StoreStats {
            count: self.count,
            capacity,
            load_factor: self.load_factor(),
            collisions: self.collision_count,
            max_chain_length,
            empty_bucket_count,
            utilization: (capacity - empty_bucket_count) as f64 / capacity as f64,
        }
    }
}

impl<K, V, S> KeyedStore<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Insert or overwrite `key`, returning the previous value if any
    ///
    /// Overwrites keep the entry's position in its chain and leave the
    /// collision counter untouched.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];

        if let Some((_, slot)) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }

        if !bucket.is_empty() {
            self.collision_count += 1;
        }

        bucket.push((key, value));
        self.count += 1;
        None
    }

    /// Look up the value stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Remove `key`, returning whether it was present
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];

        match bucket.iter().position(|(k, _)| k.borrow() == key) {
            Some(position) => {
                bucket.remove(position);
                self.count -= 1;
                true
            }
            None => false,
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }
}

impl<K, V, S> KeyedStore<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Flatten every bucket into a single map
    ///
    /// Keys are unique across buckets, so this is a pure projection. It is
    /// the form callers export, and [`KeyedStore::from_entries`] reverses it.
    pub fn all_entries(&self) -> HashMap<K, V> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K, V> KeyedStore<K, V>
where
    K: Hash + Eq,
{
    /// Rebuild a store by replaying `insert` for every entry
    pub fn from_entries<I>(capacity: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut store = Self::new(capacity)?;
        store.extend(entries);
        Ok(store)
    }
}

impl<K, V, S> Extend<(K, V)> for KeyedStore<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
