use crate::{Outcome, Step};

/// Keeps the elements a predicate accepts.
///
/// This `struct` is created by [`filter()`]. See its documentation for more.
#[derive(Clone)]
pub struct Filter<F> {
    pred: F,
}

impl<K, T, F: FnMut(&T) -> bool> Step<K, T> for Filter<F> {
    type Out = T;

    #[inline]
    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<T> {
        if (self.pred)(&value) {
            Outcome::Value(value)
        } else {
            Outcome::Skip
        }
    }
}

impl<F> std::fmt::Debug for Filter<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter").finish_non_exhaustive()
    }
}

/// Keeps the elements a predicate accepts; everything else is skipped.
///
/// # Examples
///
/// ```
/// use onepass::{engine, steps};
///
/// let evens = engine::map(vec![1, 2, 3, 4], steps::filter(|num: &i32| num % 2 == 0));
/// assert_eq!(evens, [2, 4]);
/// ```
#[inline]
pub fn filter<T, F: FnMut(&T) -> bool>(pred: F) -> Filter<F> {
    Filter { pred }
}

/// Keeps only the elements equal to a fixed value.
///
/// This `struct` is created by [`filter_eq()`]. See its documentation for
/// more.
#[derive(Debug, Clone)]
pub struct FilterEq<T> {
    expected: T,
}

impl<K, T: PartialEq> Step<K, T> for FilterEq<T> {
    type Out = T;

    #[inline]
    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<T> {
        if value == self.expected {
            Outcome::Value(value)
        } else {
            Outcome::Skip
        }
    }
}

/// Keeps only the elements equal to `expected`.
///
/// # Examples
///
/// ```
/// use onepass::{engine, steps};
///
/// let sixes = engine::count_by(vec![6, 1, 6, 3, 6], steps::filter_eq(6));
/// assert_eq!(sixes, 3);
/// ```
#[inline]
pub fn filter_eq<T: PartialEq>(expected: T) -> FilterEq<T> {
    FilterEq { expected }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use crate::{engine, steps};

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn rejected_elements_are_skipped_one_by_one() {
        let kept = engine::map(
            vec![1, -2, 3, -4, 5],
            steps::filter(|num: &i32| *num > 0),
        );
        assert_eq!(kept, [1, 3, 5]);
    }

    #[test]
    fn filter_eq_keeps_exact_matches_only() {
        let kept = engine::map(vec!["a", "b", "a", "c"], steps::filter_eq("a"));
        assert_eq!(kept, ["a", "a"]);
    }

    #[test]
    fn filtering_is_stateless() {
        use crate::Step;

        assert!(!Step::<usize, i32>::is_stateful(&steps::filter(
            |num: &i32| *num > 0
        )));
        assert!(!Step::<usize, i32>::is_stateful(&steps::filter_eq(3)));
    }
}
