#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::{self, Vec};
#[cfg(feature = "std")]
use std::vec;

#[cfg(feature = "alloc")]
use std::{
    hash::{BuildHasher, Hash},
    iter::{Cloned, Enumerate},
    slice,
};

#[cfg(feature = "alloc")]
use indexmap::IndexMap;

/// A finite collection that can be traversed once, in a fixed order.
///
/// Every entry has a position (its `index`, counted from zero in traversal
/// order) and a [`Key`](Source::Key). For sequences the key *is* the
/// position; for keyed maps the key is the map key and the position is the
/// entry's place in the map's insertion order.
///
/// A `Source` is consumed by the traversal, which is what guarantees the
/// collection cannot be structurally modified while it is being driven.
/// Borrowing sources (like `&[T]`) clone their elements instead.
///
/// The [`Output`](Source::Output) family names the "same kind" of collection
/// over a different element type, so that mapping a `Vec<T>` yields a
/// `Vec<U>` and mapping an [`IndexMap`] keeps its keys.
pub trait Source: Sized {
    /// The key attached to each entry.
    type Key;
    /// The element type.
    type Item;
    /// The traversal iterator, yielding `(key, value)` pairs in order.
    type Entries: Iterator<Item = (Self::Key, Self::Item)>;
    /// The same kind of collection, holding `U`s.
    type Output<U>;

    /// The number of entries.
    fn len(&self) -> usize;

    /// Whether there are no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the collection into its traversal iterator.
    fn into_entries(self) -> Self::Entries;

    /// Creates an empty output collection, sized for up to `len` entries.
    fn new_output<U>(len: usize) -> Self::Output<U>;

    /// Appends one surviving entry to an output collection.
    ///
    /// Called in traversal order only, so appending is enough to preserve
    /// the source's ordering.
    fn write<U>(out: &mut Self::Output<U>, key: Self::Key, value: U);
}

#[cfg(feature = "alloc")]
impl<T> Source for Vec<T> {
    type Key = usize;
    type Item = T;
    type Entries = Enumerate<vec::IntoIter<T>>;
    type Output<U> = Vec<U>;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn into_entries(self) -> Self::Entries {
        self.into_iter().enumerate()
    }

    fn new_output<U>(len: usize) -> Vec<U> {
        Vec::with_capacity(len)
    }

    #[inline]
    fn write<U>(out: &mut Vec<U>, _key: usize, value: U) {
        out.push(value);
    }
}

#[cfg(feature = "alloc")]
impl<T, const N: usize> Source for [T; N] {
    type Key = usize;
    type Item = T;
    type Entries = Enumerate<std::array::IntoIter<T, N>>;
    // A filtering traversal keeps fewer than `N` elements, so the output
    // cannot be another array.
    type Output<U> = Vec<U>;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn into_entries(self) -> Self::Entries {
        self.into_iter().enumerate()
    }

    fn new_output<U>(len: usize) -> Vec<U> {
        Vec::with_capacity(len)
    }

    #[inline]
    fn write<U>(out: &mut Vec<U>, _key: usize, value: U) {
        out.push(value);
    }
}

#[cfg(feature = "alloc")]
impl<'a, T: Clone> Source for &'a [T] {
    type Key = usize;
    type Item = T;
    type Entries = Enumerate<Cloned<slice::Iter<'a, T>>>;
    type Output<U> = Vec<U>;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn into_entries(self) -> Self::Entries {
        self.iter().cloned().enumerate()
    }

    fn new_output<U>(len: usize) -> Vec<U> {
        Vec::with_capacity(len)
    }

    #[inline]
    fn write<U>(out: &mut Vec<U>, _key: usize, value: U) {
        out.push(value);
    }
}

#[cfg(feature = "alloc")]
impl<'a, T: Clone> Source for &'a Vec<T> {
    type Key = usize;
    type Item = T;
    type Entries = Enumerate<Cloned<slice::Iter<'a, T>>>;
    type Output<U> = Vec<U>;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn into_entries(self) -> Self::Entries {
        self.as_slice().iter().cloned().enumerate()
    }

    fn new_output<U>(len: usize) -> Vec<U> {
        Vec::with_capacity(len)
    }

    #[inline]
    fn write<U>(out: &mut Vec<U>, _key: usize, value: U) {
        out.push(value);
    }
}

#[cfg(feature = "alloc")]
impl<K, V, S> Source for IndexMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    type Key = K;
    type Item = V;
    type Entries = indexmap::map::IntoIter<K, V>;
    type Output<U> = IndexMap<K, U, S>;

    #[inline]
    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn into_entries(self) -> Self::Entries {
        self.into_iter()
    }

    fn new_output<U>(len: usize) -> IndexMap<K, U, S> {
        IndexMap::with_capacity_and_hasher(len, S::default())
    }

    #[inline]
    fn write<U>(out: &mut IndexMap<K, U, S>, key: K, value: U) {
        out.insert(key, value);
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use indexmap::IndexMap;

    use crate::engine;

    #[test]
    fn mapping_a_map_keeps_keys_and_order() {
        let prices = IndexMap::from([("apple", 40), ("pear", 30), ("plum", 25)]);
        let doubled = engine::map(prices, |price: i32| price * 2);

        assert_eq!(
            doubled,
            IndexMap::from([("apple", 80), ("pear", 60), ("plum", 50)])
        );
        assert_eq!(doubled.get_index(1), Some((&"pear", &60)));
    }

    #[test]
    fn arrays_map_into_vecs() {
        let doubled = engine::map([1, 2, 3], |num: i32| num * 2);
        assert_eq!(doubled, [2, 4, 6]);
    }

    #[test]
    fn borrowed_slices_clone_their_elements() {
        let nums = vec![1, 2, 3];
        let doubled = engine::map(nums.as_slice(), |num: i32| num + 1);

        assert_eq!(doubled, [2, 3, 4]);
        // The original is untouched.
        assert_eq!(nums, [1, 2, 3]);
    }

    #[test]
    fn borrowed_vecs_work_directly() {
        let nums = vec![1, 2, 3];
        assert_eq!(engine::sum(&nums), 6);
        assert_eq!(nums.len(), 3);
    }
}
