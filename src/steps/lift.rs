use crate::{Outcome, Reduce, Step};

/// Passes every element through unchanged.
///
/// This `struct` is created by [`identity()`]. See its documentation for
/// more.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<K, T> Step<K, T> for Identity {
    type Out = T;

    #[inline]
    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<T> {
        Outcome::Value(value)
    }
}

/// A transforming closure lifted into a named step.
///
/// This `struct` is created by [`apply_fn()`]. See its documentation for
/// more.
#[derive(Clone)]
pub struct ApplyFn<F> {
    transform: F,
}

impl<K, T, U, F: FnMut(T) -> U> Step<K, T> for ApplyFn<F> {
    type Out = U;

    #[inline]
    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<U> {
        Outcome::Value((self.transform)(value))
    }
}

impl<F> std::fmt::Debug for ApplyFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplyFn").finish_non_exhaustive()
    }
}

/// A closure with full verdict control lifted into a step.
///
/// This `struct` is created by [`from_fn()`]. See its documentation for
/// more.
#[derive(Clone)]
pub struct FromFn<F> {
    verdict: F,
}

impl<K, T, U, F: FnMut(T, usize, &K) -> Outcome<U>> Step<K, T> for FromFn<F> {
    type Out = U;

    #[inline]
    fn apply(&mut self, value: T, index: usize, key: &K) -> Outcome<U> {
        (self.verdict)(value, index, key)
    }
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// A folding closure with verdict control lifted into a reducer.
///
/// This `struct` is created by [`reducing()`]. See its documentation for
/// more.
#[derive(Clone)]
pub struct Reducing<F> {
    fold: F,
}

impl<K, A, T, F: FnMut(&mut A, T) -> Outcome<()>> Reduce<K, A, T> for Reducing<F> {
    #[inline]
    fn reduce(&mut self, acc: &mut A, value: T, _index: usize, _key: &K) -> Outcome<()> {
        (self.fold)(acc, value)
    }
}

impl<F> std::fmt::Debug for Reducing<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reducing").finish_non_exhaustive()
    }
}

/// The step that changes nothing and filters nothing.
///
/// Useful as the mapper of a traversal whose work all happens in the
/// reducer.
#[inline]
pub const fn identity() -> Identity {
    Identity
}

/// Lifts a plain transforming closure into a step.
///
/// Closures already *are* steps; this wrapper only gives the step a nameable
/// type, which helps when one must be stored or boxed.
#[inline]
pub fn apply_fn<T, U, F: FnMut(T) -> U>(transform: F) -> ApplyFn<F> {
    ApplyFn { transform }
}

/// Builds a step from a closure that sees the element, its position, and its
/// key, and gives the full verdict itself.
///
/// # Examples
///
/// ```
/// use onepass::{Outcome, engine, steps};
///
/// // Keep elements on even positions only.
/// let kept = engine::map(
///     vec!["a", "b", "c", "d"],
///     steps::from_fn(|word, index, _: &usize| {
///         if index % 2 == 0 {
///             Outcome::Value(word)
///         } else {
///             Outcome::Skip
///         }
///     }),
/// );
///
/// assert_eq!(kept, ["a", "c"]);
/// ```
#[inline]
pub fn from_fn<K, T, U, F: FnMut(T, usize, &K) -> Outcome<U>>(verdict: F) -> FromFn<F> {
    FromFn { verdict }
}

/// Builds a reducer from a closure that folds into the accumulator and gives
/// the verdict itself.
///
/// # Examples
///
/// ```
/// use onepass::{Outcome, engine, steps};
///
/// // Sum until the total would pass 10.
/// let total = engine::fold(
///     vec![4, 5, 3, 1],
///     steps::reducing(|acc: &mut i32, num: i32| {
///         if *acc + num > 10 {
///             return Outcome::SkipRest;
///         }
///         *acc += num;
///         Outcome::Value(())
///     }),
///     0,
/// );
///
/// assert_eq!(total, 9);
/// ```
#[inline]
pub fn reducing<A, T, F: FnMut(&mut A, T) -> Outcome<()>>(fold: F) -> Reducing<F> {
    Reducing { fold }
}
