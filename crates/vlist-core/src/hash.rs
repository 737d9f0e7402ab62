//! Hasher selection for the pool's bookkeeping.
//!
//! Resource-keyed maps hash with `ahash` unless the `std-hash` feature asks
//! for the std hasher; node-id sets use `rustc_hash`.

use std::collections::HashMap;
use std::hash::BuildHasherDefault;

#[cfg(feature = "std-hash")]
pub type KeyHasher = std::collections::hash_map::DefaultHasher;

#[cfg(not(feature = "std-hash"))]
pub type KeyHasher = ahash::AHasher;

/// Map keyed by resource identifiers and other string-like keys.
pub type KeyMap<K, V> = HashMap<K, V, BuildHasherDefault<KeyHasher>>;

pub use rustc_hash::FxHashSet as IdSet;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceId;

    #[test]
    fn resource_keys_hash_by_content() {
        let mut map: KeyMap<ResourceId, usize> = KeyMap::default();
        map.insert(ResourceId::new("row"), 1);
        *map.entry(ResourceId::from(String::from("row"))).or_default() += 1;
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&ResourceId::new("row")), Some(&2));
    }
}
