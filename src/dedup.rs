//! Deduplication of harvested words
//!
//! Two strategies share the [`Deduplicator`] trait:
//! - Buckets: fixed number of buckets, djb2-xor hashing, chained collisions (default)
//! - HashSet: growable `hashbrown` set keyed by `ahash`
//!
//! Both are write-once membership sets: words are never removed during a run.

use ahash::RandomState;
use bstr::{BStr, ByteSlice};
use hashbrown::HashSet;
use std::io::{self, Write};
use std::mem;

/// Default number of buckets in a [`BucketTable`]
pub const DEFAULT_BUCKET_COUNT: usize = 100_000;

/// Seed of the djb2 family of hashes
pub const DJB2_SEED: u64 = 5381;

/// XOR variant of djb2: `hash = hash * 33 ^ byte`, wrapping on overflow.
#[inline]
pub fn djb2_xor(bytes: &[u8]) -> u64 {
    bytes.iter().fold(DJB2_SEED, |hash, &c| {
        (hash << 5).wrapping_add(hash) ^ u64::from(c)
    })
}

/// Trait for deduplication implementations
pub trait Deduplicator {
    /// Insert `word` unless already present.
    /// Returns true if the word was newly inserted.
    fn contains_or_insert(&mut self, word: &[u8]) -> bool;

    /// Check membership without inserting
    fn contains(&self, word: &[u8]) -> bool;

    /// Number of distinct words held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every word, leaving an empty set ready for reuse
    fn clear(&mut self);

    /// Approximate memory usage in bytes
    fn memory_usage(&self) -> usize;

    /// All distinct words, in the implementation's iteration order
    fn words(&self) -> Box<dyn Iterator<Item = &BStr> + '_>;

    /// Write every word, one per line
    fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        for word in self.words() {
            writeln!(out, "{}", word)?;
        }
        Ok(())
    }
}

/// Hash table with a fixed bucket count and per-bucket chains.
///
/// A word lives in bucket `djb2_xor(word) % bucket_count` and appears there at
/// most once. Chains keep insertion order. The table never resizes.
pub struct BucketTable {
    buckets: Vec<Vec<Box<[u8]>>>,
    len: usize,
    word_bytes: usize,
}

impl BucketTable {
    /// Create an empty table. A `bucket_count` of zero is treated as one.
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        Self {
            buckets: (0..bucket_count).map(|_| Vec::new()).collect(),
            len: 0,
            word_bytes: 0,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn bucket_index(&self, word: &[u8]) -> usize {
        (djb2_xor(word) % self.buckets.len() as u64) as usize
    }

    /// The chain stored at `index`, in insertion order
    pub fn chain(&self, index: usize) -> impl Iterator<Item = &BStr> + '_ {
        self.buckets
            .get(index)
            .into_iter()
            .flatten()
            .map(|word| word.as_bstr())
    }

    /// Every word with its bucket index, by bucket index then chain order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BStr)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(|(index, chain)| chain.iter().map(move |word| (index, word.as_bstr())))
    }

    /// Number of buckets holding at least one word
    pub fn occupied_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| !chain.is_empty()).count()
    }

    /// Length of the longest chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl Default for BucketTable {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}

impl Deduplicator for BucketTable {
    fn contains_or_insert(&mut self, word: &[u8]) -> bool {
        let index = self.bucket_index(word);
        let chain = &mut self.buckets[index];

        if chain.iter().any(|existing| existing.as_ref() == word) {
            return false;
        }

        chain.push(Box::from(word));
        self.len += 1;
        self.word_bytes += word.len();
        true
    }

    fn contains(&self, word: &[u8]) -> bool {
        self.buckets[self.bucket_index(word)]
            .iter()
            .any(|existing| existing.as_ref() == word)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
        self.word_bytes = 0;
    }

    fn memory_usage(&self) -> usize {
        let chains: usize = self
            .buckets
            .iter()
            .map(|chain| chain.capacity() * mem::size_of::<Box<[u8]>>())
            .sum();
        self.buckets.len() * mem::size_of::<Vec<Box<[u8]>>>() + chains + self.word_bytes
    }

    fn words(&self) -> Box<dyn Iterator<Item = &BStr> + '_> {
        Box::new(self.iter().map(|(_, word)| word))
    }

    fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        for (index, word) in self.iter() {
            writeln!(out, "({}) \"{}\"", index, word)?;
        }
        Ok(())
    }
}

/// Growable HashSet-based deduplicator
///
/// Resizes on demand instead of committing to a bucket count up front.
pub struct MemoryDeduplicator {
    set: HashSet<Box<[u8]>, RandomState>,
    word_bytes: usize,
}

impl MemoryDeduplicator {
    pub fn new() -> Self {
        Self {
            set: HashSet::with_hasher(RandomState::new()),
            word_bytes: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
            word_bytes: 0,
        }
    }
}

impl Default for MemoryDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for MemoryDeduplicator {
    fn contains_or_insert(&mut self, word: &[u8]) -> bool {
        if self.set.contains(word) {
            return false;
        }
        self.set.insert(Box::from(word));
        self.word_bytes += word.len();
        true
    }

    fn contains(&self, word: &[u8]) -> bool {
        self.set.contains(word)
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn clear(&mut self) {
        self.set.clear();
        self.word_bytes = 0;
    }

    fn memory_usage(&self) -> usize {
        self.set.capacity() * (mem::size_of::<Box<[u8]>>() + 1) + self.word_bytes
    }

    fn words(&self) -> Box<dyn Iterator<Item = &BStr> + '_> {
        Box::new(self.set.iter().map(|word| word.as_bstr()))
    }
}

/// Factory for creating deduplicators based on configuration
pub fn create_deduplicator(
    strategy: crate::cli::DedupStrategy,
    bucket_count: usize,
) -> Box<dyn Deduplicator> {
    match strategy {
        crate::cli::DedupStrategy::Buckets => Box::new(BucketTable::new(bucket_count)),
        crate::cli::DedupStrategy::Hashset => Box::new(MemoryDeduplicator::new()),
    }
}
