//! Fused, single-pass `map`/`filter`/`reduce` pipelines over sequences and
//! keyed maps.
//!
//! A pipeline here is a chain of [`Step`]s, each giving a verdict per
//! element: transform it, [`Skip`](Outcome::Skip) it, end the traversal with
//! [`SkipRest`](Outcome::SkipRest), or jump ahead with
//! [`SkipUntil`](Outcome::SkipUntil). The [`engine`] drives a whole chain
//! over a [`Source`] in exactly one pass.
//!
//! # Motivation
//!
//! Suppose we are handed a list of readings and asked for the first three
//! distinct positive ones, doubled. What would our approach be?
//!
//! - Approach 1: iterator chains
//!
//! ```
//! use std::collections::HashSet;
//!
//! let readings = vec![3, -1, 3, 4, 4, 7, 9];
//!
//! let mut seen = HashSet::new();
//! let picked: Vec<i32> = readings
//!     .into_iter()
//!     .filter(|num| seen.insert(*num))
//!     .filter(|num| *num > 0)
//!     .take(3)
//!     .map(|num| num * 2)
//!     .collect();
//!
//! assert_eq!(picked, [6, 8, 14]);
//! ```
//!
//! This is one pass and reads well. **Cons:** the deduplication state lives
//! outside the chain, the chain's type is fixed at compile time (the caller
//! cannot assemble "whichever filters the user picked" at runtime), and the
//! same job over a keyed map means collecting into a fresh map by hand.
//!
//! - Approach 2: a for-loop
//!
//! **Cons:** entirely procedural; the dedup set, the quota counter, and the
//! early `break` are all manual bookkeeping, written again at every call
//! site.
//!
//! This crate's way:
//!
//! ```
//! use onepass::{Step, engine, steps};
//!
//! let readings = vec![3, -1, 3, 4, 4, 7, 9];
//!
//! let picked = engine::map(
//!     readings,
//!     steps::uniq()
//!         .pipe(steps::filter(|num: &i32| *num > 0))
//!         .pipe(steps::limit(3))
//!         .pipe(|num: i32| num * 2),
//! );
//!
//! assert_eq!(picked, [6, 8, 14]);
//! ```
//!
//! Each concern is one named step, the state lives inside the steps, and the
//! quota ends the traversal the moment it fills.
//!
//! The same pipeline shape drives keyed maps, and the output keeps the keys
//! of the entries that survive:
//!
//! ```
//! use indexmap::IndexMap;
//! use onepass::{engine, steps};
//!
//! let stock = IndexMap::from([("apples", 12), ("pears", 0), ("plums", 7)]);
//! let in_stock = engine::map(stock, steps::filter(|count: &i32| *count > 0));
//!
//! assert_eq!(in_stock, IndexMap::from([("apples", 12), ("plums", 7)]));
//! ```
//!
//! And when the member list is only known at runtime, [`PipelineBuilder`]
//! assembles boxed steps into one reusable pipeline:
//!
//! ```
//! use onepass::PipelineBuilder;
//!
//! let mut positives = PipelineBuilder::new();
//! positives.filter(|num: &i32| *num > 0);
//!
//! assert_eq!(positives.map(vec![3, -1, 4]), [3, 4]);
//! assert_eq!(positives.count(vec![-1, 5]), 1);
//! ```
//!
//! # Traversal, not iteration
//!
//! The engine does not hand out an iterator to compose; it owns the loop.
//! That is what lets a verdict steer the loop itself: a
//! [`SkipUntil`](Outcome::SkipUntil) from [`steps::take_from`] lands the
//! traversal on the target position in one hop, and a
//! [`SkipRest`](Outcome::SkipRest) from [`steps::limit`] or
//! [`steps::take_while`] ends it outright. It is also what makes the
//! lifecycle airtight: every traversal brackets its steps with
//! [`setup`](Step::setup) and [`teardown`](Step::teardown), including
//! traversals that unwind partway.
//!
//! For folding, [`Reduce`] is the sink-side counterpart of [`Step`]: it
//! mutates an accumulator in place and gives the same verdicts, so a reducer
//! can end the traversal as easily as a step can. The seedless entry points
//! ([`engine::reduce`], [`engine::map_reduce`]) seed the accumulator from
//! the first surviving element instead of asking for one.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(not(feature = "std"))]
extern crate core as std;

#[cfg(feature = "alloc")]
mod builder;
pub mod engine;
mod outcome;
mod pipe;
pub mod prelude;
mod source;
mod step;
pub mod steps;

#[cfg(feature = "alloc")]
pub use builder::*;
pub use outcome::*;
pub use pipe::*;
pub use source::*;
pub use step::*;

#[inline(always)]
fn assert_step<S: Step<K, T>, K, T>(step: S) -> S {
    step
}

#[inline(always)]
fn assert_reduce<R: Reduce<K, A, T>, K, A, T>(reducer: R) -> R {
    reducer
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use crate::{Outcome, Step, engine, steps};

    #[cfg(all(feature = "alloc", not(feature = "std")))]
    use alloc::vec;

    #[cfg(feature = "alloc")]
    #[test]
    fn a_whole_pipeline_end_to_end() {
        let picked = engine::map(
            vec![3, -1, 3, 4, 4, 7, 9],
            steps::uniq()
                .pipe(steps::filter(|num: &i32| *num > 0))
                .pipe(steps::limit(3))
                .pipe(|num: i32| num * 2),
        );

        assert_eq!(picked, [6, 8, 14]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn verdicts_compose_across_step_and_reducer() {
        let total = engine::map_fold(
            vec![1, 2, 3, 4, 5, 6],
            steps::skip(1),
            steps::reducing(|acc: &mut i32, num: i32| {
                if *acc >= 9 {
                    return Outcome::SkipRest;
                }
                *acc += num;
                Outcome::Value(())
            }),
            0,
        );

        assert_eq!(total, 9);
    }
}
