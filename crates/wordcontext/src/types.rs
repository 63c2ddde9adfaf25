//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, Signed, ToPrimitive};

/// A type that can be used as an element of a vectorized index array.
///
/// These are fixed-width signed primitive integers; the default
/// throughout the crate is `i32`.
pub trait IndexType:
    'static
    + PrimInt
    + Signed
    + FromPrimitive
    + ToPrimitive
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> IndexType for T where
    T: 'static
        + PrimInt
        + Signed
        + FromPrimitive
        + ToPrimitive
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// The token string type.
///
/// Most corpus words fit the inline representation.
pub type Token = compact_str::CompactString;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WCHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WCHashMap<K, V> {
            WCHashMap::with_capacity(capacity)
        }
    } else {
        /// Type Alias for hash maps in this crate.
        pub type WCHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WCHashMap<K, V> {
            WCHashMap::with_capacity(capacity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widest_index<I: IndexType>() -> usize {
        I::max_value().to_usize().unwrap_or(usize::MAX)
    }

    #[test]
    fn test_common_index_types() {
        assert_eq!(widest_index::<i16>(), i16::MAX as usize);
        assert_eq!(widest_index::<i32>(), i32::MAX as usize);
        assert_eq!(widest_index::<i64>(), i64::MAX as usize);
        assert_eq!(widest_index::<isize>(), isize::MAX as usize);
        assert_eq!(<i32 as FromPrimitive>::from_usize(70_000), Some(70_000));
        assert_eq!(<i16 as FromPrimitive>::from_usize(70_000), None);
    }

    #[test]
    fn test_hash_map_with_capacity() {
        let mut map: WCHashMap<Token, i32> = hash_map_with_capacity(4);
        map.insert("cat".into(), 2);
        assert_eq!(map.get("cat"), Some(&2));
        assert!(map.capacity() >= 4);
    }
}
