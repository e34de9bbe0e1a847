//! Faster (but not DoS-resistant) string-keyed maps and sets
//!
//! Used for the vocabulary, the topic-word relation and every count map.
use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasherDefault, Hash, Hasher};

/// Streaming hasher built from farmhash
///
/// farmhash isn't a streaming hash, so every `write` rehashes its bytes seeded with the state so
/// far. `str` hashes as its bytes followed by a terminator byte, so chaining matters: keeping
/// only the last write would send every string to the same bucket.
pub struct FarmHasher(u64);

impl Default for FarmHasher {
    #[inline]
    fn default() -> FarmHasher {
        FarmHasher(0)
    }
}

impl Hasher for FarmHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = farmhash::hash64_with_seed(bytes, self.0);
    }
}

pub type Farm = BuildHasherDefault<FarmHasher>;
pub type FarmMap<X, Y> = HashMap<X, Y, Farm>;
pub type FarmSet<X> = HashSet<X, Farm>;

pub fn new_farm<X: Hash + Eq, Y>() -> FarmMap<X, Y> {
    Default::default()
}

pub fn new_farm_set<X: Hash + Eq>() -> FarmSet<X> {
    Default::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::BuildHasher;

    fn hash_of(s: &str) -> u64 {
        Farm::default().hash_one(s)
    }

    #[test]
    fn distinct_strings_hash_apart() {
        assert_ne!(hash_of("space"), hash_of("earth"));
        assert_ne!(hash_of("new york"), hash_of("york"));
    }

    #[test]
    fn hashing_is_stable() {
        assert_eq!(hash_of("space"), hash_of("space"));
    }

    #[test]
    fn maps_behave_like_hashmaps() {
        let mut map: FarmMap<String, u64> = new_farm();
        *map.entry("space".to_string()).or_insert(0) += 2;
        *map.entry("space".to_string()).or_insert(0) += 1;
        assert_eq!(map.get("space"), Some(&3));

        let mut set: FarmSet<&str> = new_farm_set();
        assert!(set.insert("earth"));
        assert!(!set.insert("earth"));
    }
}
