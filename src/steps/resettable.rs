use crate::{Outcome, Reduce, Step};

/// A step or reducer whose state is reset lazily, at the start of the
/// traversal after a finished one.
///
/// This `struct` is created by [`Step::resettable()`] and
/// [`Reduce::resettable()`]. See their documentation for more.
pub struct Resettable<S, R> {
    inner: S,
    reset: R,
    finished: bool,
}

impl<S, R> Resettable<S, R> {
    #[inline]
    pub(crate) fn new(inner: S, reset: R) -> Self {
        Self {
            inner,
            reset,
            finished: false,
        }
    }

    /// The wrapped step, with the state of the last finished traversal
    /// still in place.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<K, T, S, R> Step<K, T> for Resettable<S, R>
where
    S: Step<K, T>,
    R: FnMut(&mut S),
{
    type Out = S::Out;

    #[inline]
    fn apply(&mut self, value: T, index: usize, key: &K) -> Outcome<S::Out> {
        self.inner.apply(value, index, key)
    }

    fn setup(&mut self) {
        // Deferred: reset at the start of the next pass, not at the end of
        // the previous one, so the finished pass's state stays inspectable.
        if self.finished {
            (self.reset)(&mut self.inner);
            self.finished = false;
        }

        self.inner.setup();
    }

    fn teardown(&mut self) {
        self.inner.teardown();
        self.finished = true;
    }

    fn is_stateful(&self) -> bool {
        true
    }
}

impl<K, A, T, S, R> Reduce<K, A, T> for Resettable<S, R>
where
    S: Reduce<K, A, T>,
    R: FnMut(&mut S),
{
    #[inline]
    fn reduce(&mut self, acc: &mut A, value: T, index: usize, key: &K) -> Outcome<()> {
        self.inner.reduce(acc, value, index, key)
    }

    fn setup(&mut self) {
        if self.finished {
            (self.reset)(&mut self.inner);
            self.finished = false;
        }

        self.inner.setup();
    }

    fn teardown(&mut self) {
        self.inner.teardown();
        self.finished = true;
    }

    fn is_stateful(&self) -> bool {
        true
    }
}

impl<S: std::fmt::Debug, R> std::fmt::Debug for Resettable<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resettable")
            .field("inner", &self.inner)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
