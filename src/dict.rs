//! The adaptive dictionary index, a chained hash table with a fixed bucket count.
//!
//! The encoder keys it by byte string, the decoder by code. The bucket count is
//! chosen at construction and never changes; a dictionary reset replaces the
//! whole table rather than mutating it in place. Collisions are resolved by a
//! linear scan of the bucket chain.
use std::borrow::Borrow;

use crate::Code;

/// Hash for dictionary keys.
///
/// The hash must be a total, deterministic function of the key's content so
/// that both halves of a borrowed key pair (`Box<[u8]>` and `[u8]`) agree.
pub trait BucketKey {
    fn bucket_hash(&self) -> u64;
}

pub struct BucketTable<K, V> {
    buckets: Box<[Vec<(K, V)>]>,
}

impl<K: BucketKey + Eq, V> BucketTable<K, V> {
    /// Create a table with exactly `buckets` chains. The count is fixed for
    /// the lifetime of the table.
    pub fn new(buckets: usize) -> Self {
        let mut chains = Vec::with_capacity(buckets);
        chains.resize_with(buckets, Vec::new);
        BucketTable {
            buckets: chains.into_boxed_slice(),
        }
    }

    /// Append an entry. Duplicate keys are tolerated by appending to the
    /// chain; `get` and `contains` always return the first match, so callers
    /// that need overwrite semantics must not insert the same key twice.
    pub fn put(&mut self, key: K, value: V) {
        let index = self.index_of(&key);
        if let Some(chain) = self.buckets.get_mut(index) {
            chain.push((key, value));
        }
    }

    /// Look up the first entry matching `key` in chain order.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: BucketKey + Eq + ?Sized,
    {
        let index = self.index_of(key);
        let chain = self.buckets.get(index)?;
        chain
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: BucketKey + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// The fixed bucket count, not the number of entries.
    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    fn index_of<Q: BucketKey + ?Sized>(&self, key: &Q) -> usize {
        (key.bucket_hash() % self.buckets.len() as u64) as usize
    }
}

impl BucketKey for [u8] {
    /// FNV-1a over the string content.
    fn bucket_hash(&self) -> u64 {
        let mut hash = 0xcbf2_9ce4_8422_2325u64;
        for &byte in self {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        hash
    }
}

impl BucketKey for Box<[u8]> {
    fn bucket_hash(&self) -> u64 {
        self[..].bucket_hash()
    }
}

impl BucketKey for Code {
    /// Codes index their bucket directly by value.
    fn bucket_hash(&self) -> u64 {
        u64::from(*self)
    }
}
