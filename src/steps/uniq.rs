use std::hash::Hash;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::{Outcome, Step};

/// Keeps the first occurrence of every element, skipping repeats.
///
/// This `struct` is created by [`uniq()`]. See its documentation for more.
#[derive(Debug, Clone)]
pub struct Uniq<T> {
    seen: IndexSet<T, FxBuildHasher>,
}

impl<T> Uniq<T> {
    /// Forgets every element seen so far.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl<K, T: Hash + Eq + Clone> Step<K, T> for Uniq<T> {
    type Out = T;

    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<T> {
        if self.seen.insert(value.clone()) {
            Outcome::Value(value)
        } else {
            Outcome::Skip
        }
    }

    fn is_stateful(&self) -> bool {
        true
    }
}

/// Keeps the first element for every distinct derived key, skipping repeats.
///
/// This `struct` is created by [`uniq_by()`]. See its documentation for more.
pub struct UniqBy<F, I> {
    key_fn: F,
    seen: IndexSet<I, FxBuildHasher>,
}

impl<F, I> UniqBy<F, I> {
    /// Forgets every derived key seen so far.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl<K, T, I, F> Step<K, T> for UniqBy<F, I>
where
    I: Hash + Eq,
    F: FnMut(&T) -> I,
{
    type Out = T;

    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<T> {
        if self.seen.insert((self.key_fn)(&value)) {
            Outcome::Value(value)
        } else {
            Outcome::Skip
        }
    }

    fn is_stateful(&self) -> bool {
        true
    }
}

impl<F, I> std::fmt::Debug for UniqBy<F, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniqBy")
            .field("seen", &self.seen.len())
            .finish_non_exhaustive()
    }
}

/// Keeps each distinct element once, in first-seen order.
///
/// The seen-set persists for the step's lifetime, so driving the same `Uniq`
/// across several traversals deduplicates across all of them. Start fresh
/// with [`Uniq::clear`], a hook, or [`Step::resettable`](crate::Step::resettable).
///
/// # Examples
///
/// ```
/// use onepass::{engine, steps};
///
/// let distinct = engine::map(vec![3, 1, 3, 2, 1], steps::uniq());
/// assert_eq!(distinct, [3, 1, 2]);
/// ```
#[inline]
pub fn uniq<T: Hash + Eq>() -> Uniq<T> {
    Uniq {
        seen: IndexSet::default(),
    }
}

/// Keeps the first element for each distinct `key_fn` result.
///
/// # Examples
///
/// ```
/// use onepass::{engine, steps};
///
/// let one_per_length = engine::map(
///     vec!["by", "to", "sun", "of", "mars"],
///     steps::uniq_by(|word: &&str| word.len()),
/// );
/// assert_eq!(one_per_length, ["by", "sun", "mars"]);
/// ```
#[inline]
pub fn uniq_by<T, I: Hash + Eq, F: FnMut(&T) -> I>(key_fn: F) -> UniqBy<F, I> {
    UniqBy {
        key_fn,
        seen: IndexSet::default(),
    }
}
