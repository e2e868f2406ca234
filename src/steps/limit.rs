use crate::{Outcome, Step};

/// Keeps at most a fixed number of elements, counted as they arrive here.
///
/// This `struct` is created by [`limit()`]. See its documentation for more.
#[derive(Debug, Clone)]
pub struct Limit {
    quota: usize,
    used: usize,
}

impl Limit {
    /// Restores the full quota.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// How many more elements this step will keep.
    pub fn remaining(&self) -> usize {
        self.quota - self.used
    }
}

impl<K, T> Step<K, T> for Limit {
    type Out = T;

    #[inline]
    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<T> {
        // A quota of zero rejects from the very first element.
        if self.used >= self.quota {
            return Outcome::SkipRest;
        }

        self.used += 1;
        Outcome::Value(value)
    }

    fn is_stateful(&self) -> bool {
        true
    }
}

/// Keeps at most `quota` elements, then ends the traversal.
///
/// The count is of elements that *reach* this step, so a limit placed after
/// a filter counts only the filter's survivors.
///
/// # Examples
///
/// ```
/// use onepass::{Step, engine, steps};
///
/// let first_two_odds = engine::map(
///     vec![2, 1, 4, 3, 5],
///     steps::filter(|num: &i32| num % 2 != 0).pipe(steps::limit(2)),
/// );
/// assert_eq!(first_two_odds, [1, 3]);
/// ```
#[inline]
pub fn limit(quota: usize) -> Limit {
    Limit { quota, used: 0 }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use crate::{Step, engine, steps};

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn the_quota_ends_the_traversal() {
        let mut visited = 0;
        let kept = engine::map(
            vec![1, 2, 3, 4],
            steps::from_fn(|num: i32, _: usize, _: &usize| {
                visited += 1;
                crate::Outcome::Value(num)
            })
            .pipe(steps::limit(2)),
        );

        assert_eq!(kept, [1, 2]);
        // The element after the quota is the one that trips SkipRest; none
        // past it are visited.
        assert_eq!(visited, 3);
    }

    #[test]
    fn a_zero_quota_keeps_nothing() {
        let kept = engine::map(vec![1, 2, 3], steps::limit(0));
        assert!(kept.is_empty());
    }

    #[test]
    fn reset_restores_the_quota() {
        let mut quota = steps::limit(2);

        assert_eq!(engine::map(vec![1, 2, 3], quota.by_ref()), [1, 2]);
        assert_eq!(quota.remaining(), 0);

        quota.reset();
        assert_eq!(engine::map(vec![4, 5, 6], quota.by_ref()), [4, 5]);
    }
}
