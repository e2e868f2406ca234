#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use std::{hash::Hash, mem, ops::AddAssign};

use crate::{BoxStep, ByRef, Reduce, Source, Step, engine, pipe::fuse_steps, steps};

/// Builds up a reusable pipeline of same-type steps, then drives sources
/// through it.
///
/// Steps are appended one at a time and fused into a single boxed step the
/// first time the builder runs; appending afterwards folds the fused pipe
/// back in and recompiles on the next run. Every terminal borrows the
/// pipeline, so one builder can drive any number of sources, and stateful
/// steps keep their state from one run to the next unless reset.
///
/// # Examples
///
/// ```
/// use onepass::PipelineBuilder;
///
/// let mut positives = PipelineBuilder::new();
/// positives.filter(|num: &i32| *num > 0);
///
/// assert_eq!(positives.map(vec![1, -2, 3]), [1, 3]);
/// assert_eq!(positives.count(vec![-1, -2, 4]), 1);
/// assert_eq!(positives.sum(vec![5, -9, 5]), 10);
/// ```
pub struct PipelineBuilder<K: 'static, T: 'static> {
    pending: Vec<BoxStep<K, T>>,
    compiled: Option<BoxStep<K, T>>,
}

impl<K, T> PipelineBuilder<K, T> {
    /// An empty pipeline, which passes every element through.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            compiled: None,
        }
    }

    /// A pipeline starting from one step.
    pub fn from_step(step: impl Step<K, T, Out = T> + 'static) -> Self {
        let mut builder = Self::new();
        builder.step(step);
        builder
    }

    /// Appends any value-preserving step.
    ///
    /// If the pipeline was already compiled by an earlier run, the compiled
    /// pipe is demoted to an ordinary member and the whole list is fused
    /// again on the next run.
    pub fn step(&mut self, step: impl Step<K, T, Out = T> + 'static) -> &mut Self {
        if let Some(compiled) = self.compiled.take() {
            self.pending.push(compiled);
        }

        self.pending.push(Box::new(step));
        self
    }

    /// Appends [`steps::filter`].
    pub fn filter(&mut self, pred: impl FnMut(&T) -> bool + 'static) -> &mut Self {
        self.step(steps::filter(pred))
    }

    /// Appends [`steps::filter_eq`].
    pub fn filter_eq(&mut self, expected: T) -> &mut Self
    where
        T: PartialEq,
    {
        self.step(steps::filter_eq(expected))
    }

    /// Appends [`steps::take_while`].
    pub fn take_while(&mut self, pred: impl FnMut(&T) -> bool + 'static) -> &mut Self {
        self.step(steps::take_while(pred))
    }

    /// Appends [`steps::take_until`].
    pub fn take_until(&mut self, pred: impl FnMut(&T) -> bool + 'static) -> &mut Self {
        self.step(steps::take_until(pred))
    }

    /// Appends [`steps::take_from`].
    pub fn take_from(&mut self, start: usize) -> &mut Self {
        self.step(steps::take_from(start))
    }

    /// Appends [`steps::skip`].
    pub fn skip(&mut self, n: usize) -> &mut Self {
        self.step(steps::skip(n))
    }

    /// Appends [`steps::limit`].
    pub fn limit(&mut self, quota: usize) -> &mut Self {
        self.step(steps::limit(quota))
    }

    /// Appends [`steps::uniq`].
    pub fn uniq(&mut self) -> &mut Self
    where
        T: Hash + Eq + Clone,
    {
        self.step(steps::uniq())
    }

    /// Appends [`steps::uniq_by`].
    pub fn uniq_by<I: Hash + Eq + 'static>(
        &mut self,
        key_fn: impl FnMut(&T) -> I + 'static,
    ) -> &mut Self {
        self.step(steps::uniq_by(key_fn))
    }

    /// The number of steps appended so far.
    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.compiled.is_some())
    }

    /// Whether no step has been appended.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.compiled.is_none()
    }

    /// Fuses the pending members, reusing the fusion from the last run when
    /// nothing was appended since.
    fn compiled_pipe(&mut self) -> &mut BoxStep<K, T> {
        let pending = &mut self.pending;
        self.compiled
            .get_or_insert_with(|| fuse_steps(mem::take(pending)))
    }

    /// Maps `source` through the pipeline, collecting the survivors.
    pub fn map<S>(&mut self, source: S) -> S::Output<T>
    where
        S: Source<Key = K, Item = T>,
    {
        engine::map(source, ByRef(&mut **self.compiled_pipe()))
    }

    /// Maps `source` through the pipeline and `extra`, collecting the
    /// survivors.
    ///
    /// `extra` runs after the pipeline's own steps and is not retained, so
    /// a transforming step can be used for one run without changing the
    /// pipeline's element type.
    pub fn map_with<S, E>(&mut self, source: S, extra: E) -> S::Output<E::Out>
    where
        S: Source<Key = K, Item = T>,
        E: Step<K, T>,
    {
        engine::map(source, ByRef(&mut **self.compiled_pipe()).pipe(extra))
    }

    /// Drives `source` through the pipeline for effects alone.
    pub fn for_each<S>(&mut self, source: S)
    where
        S: Source<Key = K, Item = T>,
    {
        engine::for_each(source, ByRef(&mut **self.compiled_pipe()));
    }

    /// Drives `source` through the pipeline and `extra`, for effects alone.
    pub fn for_each_with<S, E>(&mut self, source: S, extra: E)
    where
        S: Source<Key = K, Item = T>,
        E: Step<K, T>,
    {
        engine::for_each(source, ByRef(&mut **self.compiled_pipe()).pipe(extra));
    }

    /// Reduces the pipeline's survivors, seeding from the first one.
    ///
    /// See [`engine::map_reduce`] for the seeding rules.
    pub fn reduce<S, R>(&mut self, source: S, reducer: R) -> Option<T>
    where
        S: Source<Key = K, Item = T>,
        R: Reduce<K, T, T>,
    {
        engine::map_reduce(source, ByRef(&mut **self.compiled_pipe()), reducer)
    }

    /// Reduces the survivors of the pipeline and `extra`, seeding from the
    /// first one.
    pub fn reduce_with<S, E, R>(&mut self, source: S, extra: E, reducer: R) -> Option<E::Out>
    where
        S: Source<Key = K, Item = T>,
        E: Step<K, T>,
        R: Reduce<K, E::Out, E::Out>,
    {
        engine::map_reduce(
            source,
            ByRef(&mut **self.compiled_pipe()).pipe(extra),
            reducer,
        )
    }

    /// Folds the pipeline's survivors into `seed`.
    pub fn fold<S, A, R>(&mut self, source: S, reducer: R, seed: A) -> A
    where
        S: Source<Key = K, Item = T>,
        R: Reduce<K, A, T>,
    {
        engine::map_fold(source, ByRef(&mut **self.compiled_pipe()), reducer, seed)
    }

    /// Folds the survivors of the pipeline and `extra` into `seed`.
    pub fn fold_with<S, E, A, R>(&mut self, source: S, extra: E, reducer: R, seed: A) -> A
    where
        S: Source<Key = K, Item = T>,
        E: Step<K, T>,
        R: Reduce<K, A, E::Out>,
    {
        engine::map_fold(
            source,
            ByRef(&mut **self.compiled_pipe()).pipe(extra),
            reducer,
            seed,
        )
    }

    /// Sums the pipeline's survivors, starting from the type's default.
    pub fn sum<S>(&mut self, source: S) -> T
    where
        S: Source<Key = K, Item = T>,
        T: Default + AddAssign,
    {
        engine::sum_by(source, ByRef(&mut **self.compiled_pipe()))
    }

    /// Sums the survivors of the pipeline and `extra`.
    pub fn sum_with<S, E>(&mut self, source: S, extra: E) -> E::Out
    where
        S: Source<Key = K, Item = T>,
        E: Step<K, T>,
        E::Out: Default + AddAssign,
    {
        engine::sum_by(source, ByRef(&mut **self.compiled_pipe()).pipe(extra))
    }

    /// Counts the pipeline's survivors.
    ///
    /// An empty pipeline keeps everything, so the answer is read straight
    /// from the source's length without a traversal.
    pub fn count<S>(&mut self, source: S) -> usize
    where
        S: Source<Key = K, Item = T>,
    {
        if self.is_empty() {
            return engine::count(source);
        }

        engine::count_by(source, ByRef(&mut **self.compiled_pipe()))
    }

    /// Counts the survivors of the pipeline and `extra`.
    pub fn count_with<S, E>(&mut self, source: S, extra: E) -> usize
    where
        S: Source<Key = K, Item = T>,
        E: Step<K, T>,
    {
        engine::count_by(source, ByRef(&mut **self.compiled_pipe()).pipe(extra))
    }
}

impl<K, T> Default for PipelineBuilder<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> std::fmt::Debug for PipelineBuilder<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("pending", &self.pending.len())
            .field("compiled", &self.compiled.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::PipelineBuilder;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn sugar_methods_chain() {
        let mut pipeline = PipelineBuilder::new();
        pipeline
            .skip(1)
            .filter(|num: &i32| num % 2 == 0)
            .limit(2);

        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.map(vec![1, 2, 3, 4, 5, 6, 7]), [2, 4]);
    }

    #[test]
    fn an_empty_builder_passes_everything_through() {
        let mut pipeline = PipelineBuilder::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.map(vec![1, 2, 3]), [1, 2, 3]);
    }

    #[test]
    fn appending_after_a_run_recompiles() {
        let mut pipeline = PipelineBuilder::new();
        pipeline.filter(|num: &i32| *num > 0);

        assert_eq!(pipeline.map(vec![1, -2, 3]), [1, 3]);

        pipeline.filter(|num: &i32| *num < 10);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.map(vec![-1, 5, 20]), [5]);
    }

    #[test]
    fn with_terminals_do_not_retain_the_extra_step() {
        let mut pipeline = PipelineBuilder::from_step(crate::steps::filter(|num: &i32| *num > 0));

        let doubled = pipeline.map_with(vec![1, -2, 3], |num: i32| num * 2);
        assert_eq!(doubled, [2, 6]);

        // The transforming step is gone; the pipeline still yields `i32`s
        // untransformed.
        assert_eq!(pipeline.map(vec![1, -2, 3]), [1, 3]);
        assert_eq!(pipeline.len(), 1);
    }

    #[test]
    fn reduce_and_fold_run_after_the_pipeline() {
        let mut evens = PipelineBuilder::new();
        evens.filter(|num: &i32| num % 2 == 0);

        let total = evens.fold(
            vec![1, 2, 3, 4],
            |acc: &mut i32, num: i32| *acc += num,
            0,
        );
        assert_eq!(total, 6);

        let biggest = evens.reduce(vec![1, 8, 3, 4], crate::steps::reducing(
            |acc: &mut i32, num: i32| {
                if num > *acc {
                    *acc = num;
                }
                crate::Outcome::Value(())
            },
        ));
        assert_eq!(biggest, Some(8));
    }

    #[test]
    fn count_on_an_empty_pipeline_reads_the_length() {
        let mut pipeline = PipelineBuilder::<usize, i32>::new();
        assert_eq!(pipeline.count(vec![7, 8, 9]), 3);
    }

    #[test]
    fn stateful_steps_span_runs_until_reset() {
        let mut pipeline = PipelineBuilder::new();
        pipeline.uniq();

        assert_eq!(pipeline.map(vec![1, 1, 2]), [1, 2]);
        // The seen-set is still warm from the first run.
        assert!(pipeline.map(vec![2, 1]).is_empty());
    }

    #[cfg(feature = "std")]
    mod keyed {
        use indexmap::IndexMap;

        use crate::PipelineBuilder;

        #[test]
        fn keyed_sources_keep_surviving_keys() {
            let mut pipeline = PipelineBuilder::new();
            pipeline.filter(|num: &i32| num % 2 != 0);

            let odds = pipeline.map(IndexMap::from([("a", 1), ("b", 2), ("c", 3)]));
            assert_eq!(odds, IndexMap::from([("a", 1), ("c", 3)]));
        }
    }
}
