use crate::{Outcome, Step};

/// Keeps elements until a predicate first rejects one, then ends the
/// traversal.
///
/// This `struct` is created by [`take_while()`]. See its documentation for
/// more.
#[derive(Clone)]
pub struct TakeWhile<F> {
    pred: F,
}

impl<K, T, F: FnMut(&T) -> bool> Step<K, T> for TakeWhile<F> {
    type Out = T;

    #[inline]
    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<T> {
        if (self.pred)(&value) {
            Outcome::Value(value)
        } else {
            Outcome::SkipRest
        }
    }
}

impl<F> std::fmt::Debug for TakeWhile<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TakeWhile").finish_non_exhaustive()
    }
}

/// Keeps elements until a predicate first accepts one, then ends the
/// traversal. The accepted element itself is dropped.
///
/// This `struct` is created by [`take_until()`]. See its documentation for
/// more.
#[derive(Clone)]
pub struct TakeUntil<F> {
    pred: F,
}

impl<K, T, F: FnMut(&T) -> bool> Step<K, T> for TakeUntil<F> {
    type Out = T;

    #[inline]
    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<T> {
        if (self.pred)(&value) {
            Outcome::SkipRest
        } else {
            Outcome::Value(value)
        }
    }
}

impl<F> std::fmt::Debug for TakeUntil<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TakeUntil").finish_non_exhaustive()
    }
}

/// Drops everything before a fixed position.
///
/// This `struct` is created by [`take_from()`] and [`skip()`]. See their
/// documentation for more.
#[derive(Debug, Clone, Copy)]
pub struct TakeFrom {
    start: usize,
}

impl<K, T> Step<K, T> for TakeFrom {
    type Out = T;

    #[inline]
    fn apply(&mut self, value: T, index: usize, _key: &K) -> Outcome<T> {
        if index < self.start {
            // One jump verdict lands the traversal on `start` directly, so
            // the elements in between are never materialized.
            Outcome::SkipUntil(self.start)
        } else {
            Outcome::Value(value)
        }
    }
}

/// Keeps elements as long as `pred` accepts them, then ends the traversal.
///
/// # Examples
///
/// ```
/// use onepass::{engine, steps};
///
/// let prefix = engine::map(vec![1, 2, 5, 1], steps::take_while(|num: &i32| *num < 3));
/// assert_eq!(prefix, [1, 2]);
/// ```
#[inline]
pub fn take_while<T, F: FnMut(&T) -> bool>(pred: F) -> TakeWhile<F> {
    TakeWhile { pred }
}

/// Keeps elements up to, and excluding, the first one `pred` accepts.
///
/// # Examples
///
/// ```
/// use onepass::{engine, steps};
///
/// let before_stop = engine::map(
///     vec!["ok", "ok", "stop", "ok"],
///     steps::take_until(|word: &&str| *word == "stop"),
/// );
/// assert_eq!(before_stop, ["ok", "ok"]);
/// ```
#[inline]
pub fn take_until<T, F: FnMut(&T) -> bool>(pred: F) -> TakeUntil<F> {
    TakeUntil { pred }
}

/// Keeps only the elements at position `start` and after.
///
/// The dropped prefix is jumped over in one verdict, so sources whose
/// traversal can seek (like vectors) never touch the skipped elements.
///
/// # Examples
///
/// ```
/// use onepass::{engine, steps};
///
/// let tail = engine::map(vec![10, 20, 30, 40], steps::take_from(2));
/// assert_eq!(tail, [30, 40]);
/// ```
#[inline]
pub fn take_from(start: usize) -> TakeFrom {
    TakeFrom { start }
}

/// Drops the first `n` elements. Equivalent to [`take_from(n)`](take_from).
#[inline]
pub fn skip(n: usize) -> TakeFrom {
    take_from(n)
}
