//! Single-pass traversals: every entry point here walks its source exactly
//! once, threading each element through a [`Step`] and, for the folding
//! entry points, a [`Reduce`].
//!
//! Advancement is governed entirely by [`Outcome::next_index`]: a plain
//! verdict moves one element ahead, [`Outcome::SkipRest`] ends the walk, and
//! [`Outcome::SkipUntil`] jumps forward without visiting the elements in
//! between.

use std::ops::AddAssign;

use crate::{Outcome, Reduce, Source, Step, steps};

/// Runs the step's teardown when dropped, so a panicking traversal still
/// closes whatever the step opened in setup.
struct TeardownGuard<'a, S> {
    target: &'a mut S,
    teardown: fn(&mut S),
}

impl<S> Drop for TeardownGuard<'_, S> {
    fn drop(&mut self) {
        (self.teardown)(self.target);
    }
}

fn drive<S, M, F>(source: S, mapper: &mut M, mut sink: F)
where
    S: Source,
    M: Step<S::Key, S::Item>,
    F: FnMut(usize, S::Key, M::Out) -> Outcome<()>,
{
    let len = source.len();
    let mut entries = source.into_entries();
    let mut index = 0;

    while index < len {
        let Some((key, value)) = entries.next() else {
            break;
        };

        let next = match mapper.apply(value, index, &key) {
            Outcome::Value(mapped) => sink(index, key, mapped).next_index(index, len),
            outcome => outcome.next_index(index, len),
        };

        // Discard the entries a jump passes over; `next` can never be
        // behind `index + 1`.
        let jumped = next - (index + 1);
        if jumped > 0 && next < len {
            let _ = entries.nth(jumped - 1);
        }

        index = next;
    }
}

/// Maps `source` through `mapper`, collecting the survivors into the same
/// kind of collection.
///
/// Elements the step filters out are simply absent from the output; keyed
/// sources keep the keys of the surviving entries.
///
/// # Examples
///
/// ```
/// use onepass::{Step, engine, steps};
///
/// let big_doubled = engine::map(
///     vec![4, 1, 8, 2],
///     steps::filter(|num: &i32| *num >= 4).pipe(|num: i32| num * 2),
/// );
///
/// assert_eq!(big_doubled, [8, 16]);
/// ```
pub fn map<S, M>(source: S, mut mapper: M) -> S::Output<M::Out>
where
    S: Source,
    M: Step<S::Key, S::Item>,
{
    mapper.setup();
    let mapper = TeardownGuard {
        target: &mut mapper,
        teardown: <M as Step<S::Key, S::Item>>::teardown,
    };

    let mut out = S::new_output(source.len());
    drive(source, &mut *mapper.target, |_index, key, mapped| {
        S::write(&mut out, key, mapped);
        Outcome::Value(())
    });
    drop(mapper);

    out
}

/// Drives `source` through `mapper` for the step's effects alone.
pub fn for_each<S, M>(source: S, mut mapper: M)
where
    S: Source,
    M: Step<S::Key, S::Item>,
{
    mapper.setup();
    let mapper = TeardownGuard {
        target: &mut mapper,
        teardown: <M as Step<S::Key, S::Item>>::teardown,
    };

    drive(source, &mut *mapper.target, |_index, _key, _mapped| {
        Outcome::Value(())
    });
}

/// Maps and reduces in one pass, seeding the accumulator from the data.
///
/// The first value the mapper lets through becomes the accumulator and is
/// *not* offered to the reducer; every later survivor is. A reducer verdict
/// that filters a value out leaves the accumulator as it was, and never
/// re-seeds it. Returns `None` when nothing survived the mapper.
///
/// # Examples
///
/// ```
/// use onepass::engine;
///
/// let total = engine::map_reduce(
///     vec![1, 2],
///     |num: i32| num * 2,
///     |acc: &mut i32, num: i32| *acc += num,
/// );
///
/// assert_eq!(total, Some(6));
/// assert_eq!(
///     engine::map_reduce(Vec::<i32>::new(), |num: i32| num, |_: &mut i32, _: i32| {}),
///     None,
/// );
/// ```
pub fn map_reduce<S, M, R>(source: S, mut mapper: M, mut reducer: R) -> Option<M::Out>
where
    S: Source,
    M: Step<S::Key, S::Item>,
    R: Reduce<S::Key, M::Out, M::Out>,
{
    mapper.setup();
    let mapper = TeardownGuard {
        target: &mut mapper,
        teardown: <M as Step<S::Key, S::Item>>::teardown,
    };
    reducer.setup();
    let reducer = TeardownGuard {
        target: &mut reducer,
        teardown: <R as Reduce<S::Key, M::Out, M::Out>>::teardown,
    };

    let mut acc = None;
    drive(source, &mut *mapper.target, |index, key, mapped| {
        if let Some(current) = acc.as_mut() {
            reducer.target.reduce(current, mapped, index, &key)
        } else {
            acc = Some(mapped);
            Outcome::Value(())
        }
    });
    drop(mapper);
    drop(reducer);

    acc
}

/// Maps and folds in one pass, starting from an explicit `seed`.
///
/// # Examples
///
/// ```
/// use onepass::engine;
///
/// let shouted = engine::map_fold(
///     vec!["on", "we", "go"],
///     |word: &str| word.to_uppercase(),
///     |acc: &mut String, word: String| acc.push_str(&word),
///     String::new(),
/// );
///
/// assert_eq!(shouted, "ONWEGO");
/// ```
pub fn map_fold<S, M, A, R>(source: S, mut mapper: M, mut reducer: R, seed: A) -> A
where
    S: Source,
    M: Step<S::Key, S::Item>,
    R: Reduce<S::Key, A, M::Out>,
{
    mapper.setup();
    let mapper = TeardownGuard {
        target: &mut mapper,
        teardown: <M as Step<S::Key, S::Item>>::teardown,
    };
    reducer.setup();
    let reducer = TeardownGuard {
        target: &mut reducer,
        teardown: <R as Reduce<S::Key, A, M::Out>>::teardown,
    };

    let mut acc = seed;
    drive(source, &mut *mapper.target, |index, key, mapped| {
        reducer.target.reduce(&mut acc, mapped, index, &key)
    });
    drop(mapper);
    drop(reducer);

    acc
}

/// Reduces the source's own elements, seeding from the first one.
///
/// See [`map_reduce`] for the seeding rules.
pub fn reduce<S, R>(source: S, reducer: R) -> Option<S::Item>
where
    S: Source,
    R: Reduce<S::Key, S::Item, S::Item>,
{
    map_reduce(source, steps::identity(), reducer)
}

/// Folds the source's own elements, starting from an explicit `seed`.
pub fn fold<S, A, R>(source: S, reducer: R, seed: A) -> A
where
    S: Source,
    R: Reduce<S::Key, A, S::Item>,
{
    map_fold(source, steps::identity(), reducer, seed)
}

/// Sums the source's elements, starting from the type's default.
///
/// # Examples
///
/// ```
/// use onepass::engine;
///
/// assert_eq!(engine::sum(vec![1, 2, 3]), 6);
/// ```
pub fn sum<S>(source: S) -> S::Item
where
    S: Source,
    S::Item: Default + AddAssign,
{
    sum_by(source, steps::identity())
}

/// Sums what `mapper` lets through.
pub fn sum_by<S, M>(source: S, mapper: M) -> M::Out
where
    S: Source,
    M: Step<S::Key, S::Item>,
    M::Out: Default + AddAssign,
{
    map_fold(
        source,
        mapper,
        |acc: &mut M::Out, value: M::Out| *acc += value,
        M::Out::default(),
    )
}

/// The number of entries in the source.
///
/// This reads the length directly; the source is not traversed and no step
/// lifecycle runs.
pub fn count<S: Source>(source: S) -> usize {
    source.len()
}

/// Counts the elements `mapper` lets through, traversing the source once.
pub fn count_by<S, M>(source: S, mapper: M) -> usize
where
    S: Source,
    M: Step<S::Key, S::Item>,
{
    map_fold(source, mapper, |count: &mut usize, _: M::Out| *count += 1, 0)
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use crate::{Outcome, engine, steps};

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn map_without_filtering_is_an_identity_on_shape() {
        assert_eq!(engine::map(vec![1, 2, 3], steps::identity()), [1, 2, 3]);
    }

    #[test]
    fn take_while_stops_at_first_failure() {
        let prefix = engine::map(vec![1, 2, 5, 1], steps::take_while(|num: &i32| *num < 3));
        assert_eq!(prefix, [1, 2]);
    }

    #[test]
    fn map_reduce_seeds_from_the_first_mapped_value() {
        let total = engine::map_reduce(
            vec![1, 2],
            |num: i32| num * 2,
            |acc: &mut i32, num: i32| *acc += num,
        );
        assert_eq!(total, Some(6));
    }

    #[test]
    fn map_reduce_on_empty_input_is_none() {
        let total = engine::map_reduce(
            Vec::<i32>::new(),
            |num: i32| num,
            |acc: &mut i32, num: i32| *acc += num,
        );
        assert_eq!(total, None);
    }

    #[test]
    fn reducer_rejections_leave_the_accumulator_alone() {
        let biggest = engine::reduce(
            vec![5, 9, 3, 9],
            steps::reducing(|acc: &mut i32, num: i32| {
                if num > *acc {
                    *acc = num;
                    Outcome::Value(())
                } else {
                    Outcome::Skip
                }
            }),
        );
        assert_eq!(biggest, Some(9));
    }

    #[test]
    fn a_reducer_can_end_the_traversal() {
        let mut visited = 0;
        let total = engine::fold(
            vec![1, 2, 3, 4, 5],
            steps::reducing(|acc: &mut i32, num: i32| {
                visited += 1;
                *acc += num;
                if *acc >= 6 { Outcome::SkipRest } else { Outcome::Value(()) }
            }),
            0,
        );

        assert_eq!(total, 6);
        assert_eq!(visited, 3);
    }

    #[test]
    fn sum_and_count() {
        assert_eq!(engine::sum(vec![1, 2, 3, 4]), 10);
        assert_eq!(engine::count(vec![1, 2, 3, 4]), 4);
        assert_eq!(
            engine::count_by(vec![1, 2, 3, 4], steps::filter(|num: &i32| num % 2 == 0)),
            2
        );
    }

    #[test]
    fn count_does_not_run_the_lifecycle() {
        // `count` answers from the length alone, so even a step is not
        // accepted: only `count_by` traverses.
        assert_eq!(engine::count(vec![1, 2, 3]), 3);
    }

    #[cfg(feature = "std")]
    mod keyed {
        use indexmap::IndexMap;

        use crate::engine;

        #[test]
        fn keyed_reduce_sums_values() {
            let scores = IndexMap::from([("x", 1), ("y", 2)]);
            let total = engine::reduce(scores, |acc: &mut i32, num: i32| *acc += num);
            assert_eq!(total, Some(3));
        }

        #[test]
        fn keyed_map_reduce() {
            let scores = IndexMap::from([("x", 1), ("y", 2)]);
            let total = engine::map_reduce(
                scores,
                |num: i32| num * 2,
                |acc: &mut i32, num: i32| *acc += num,
            );
            assert_eq!(total, Some(6));
        }

        #[test]
        fn steps_see_positions_and_keys() {
            use crate::steps;

            let scores = IndexMap::from([("x", 1), ("y", 2), ("z", 3)]);
            let mut seen = Vec::new();
            engine::for_each(
                scores,
                steps::from_fn(|num: i32, index: usize, key: &&str| {
                    seen.push((index, *key, num));
                    crate::Outcome::Value(num)
                }),
            );

            assert_eq!(seen, [(0, "x", 1), (1, "y", 2), (2, "z", 3)]);
        }
    }

    #[cfg(feature = "std")]
    mod teardown {
        use std::{
            panic::{AssertUnwindSafe, catch_unwind},
            rc::Rc,
            cell::Cell,
        };

        use crate::{Reduce, Step, engine, steps};

        #[test]
        fn teardown_runs_when_the_traversal_unwinds() {
            let torn_down = Rc::new(Cell::new(false));
            let flag = Rc::clone(&torn_down);

            let exploding = steps::from_fn(|num: i32, _: usize, _: &usize| {
                if num == 3 {
                    panic!("boom");
                }
                crate::Outcome::Value(num)
            })
            .with_hooks(|_| {}, move |_| flag.set(true));

            let result = catch_unwind(AssertUnwindSafe(|| {
                engine::for_each(vec![1, 2, 3, 4], exploding);
            }));

            assert!(result.is_err());
            assert!(torn_down.get());
        }

        #[test]
        fn reducer_teardown_runs_when_the_mapper_panics() {
            let torn_down = Rc::new(Cell::new(false));
            let flag = Rc::clone(&torn_down);

            let result = catch_unwind(AssertUnwindSafe(|| {
                engine::map_fold(
                    vec![1, 2, 3],
                    steps::from_fn(|_: i32, _: usize, _: &usize| -> crate::Outcome<i32> {
                        panic!("boom")
                    }),
                    (|acc: &mut i32, num: i32| *acc += num)
                        .with_hooks(|_| {}, move |_| flag.set(true)),
                    0,
                );
            }));

            assert!(result.is_err());
            assert!(torn_down.get());
        }
    }

    #[cfg(feature = "std")]
    mod proptests {
        use proptest::collection::vec as propvec;
        use proptest::prelude::*;

        use crate::engine;

        proptest! {
            #[test]
            fn map_fold_matches_iterator_fold(nums in propvec(any::<i32>(), ..100)) {
                let expected: i64 = nums.iter().copied().map(i64::from).sum();
                let total = engine::map_fold(
                    nums,
                    |num: i32| i64::from(num),
                    |acc: &mut i64, num: i64| *acc += num,
                    0_i64,
                );

                prop_assert_eq!(expected, total);
            }

            #[test]
            fn seedless_reduce_matches_iterator_reduce(nums in propvec(any::<i32>(), ..100)) {
                let expected = nums.iter().copied().map(i64::from).reduce(i64::min);
                let smallest = engine::map_reduce(
                    nums,
                    |num: i32| i64::from(num),
                    |acc: &mut i64, num: i64| *acc = (*acc).min(num),
                );

                prop_assert_eq!(expected, smallest);
            }
        }
    }
}
