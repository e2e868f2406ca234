use crate::{Outcome, Reduce, Step};

/// A step or reducer with extra setup and teardown hooks attached.
///
/// This `struct` is created by [`Step::with_hooks()`] and
/// [`Reduce::with_hooks()`]. See their documentation for more.
pub struct Hooked<S, Su, Td> {
    inner: S,
    on_setup: Su,
    on_teardown: Td,
}

impl<S, Su, Td> Hooked<S, Su, Td> {
    #[inline]
    pub(crate) fn new(inner: S, on_setup: Su, on_teardown: Td) -> Self {
        Self {
            inner,
            on_setup,
            on_teardown,
        }
    }
}

impl<K, T, S, Su, Td> Step<K, T> for Hooked<S, Su, Td>
where
    S: Step<K, T>,
    Su: FnMut(&mut S),
    Td: FnMut(&mut S),
{
    type Out = S::Out;

    #[inline]
    fn apply(&mut self, value: T, index: usize, key: &K) -> Outcome<S::Out> {
        self.inner.apply(value, index, key)
    }

    fn setup(&mut self) {
        self.inner.setup();
        (self.on_setup)(&mut self.inner);
    }

    fn teardown(&mut self) {
        self.inner.teardown();
        (self.on_teardown)(&mut self.inner);
    }

    fn is_stateful(&self) -> bool {
        // The hooks themselves are a reason to be visited, whatever the
        // wrapped step says.
        true
    }
}

impl<K, A, T, S, Su, Td> Reduce<K, A, T> for Hooked<S, Su, Td>
where
    S: Reduce<K, A, T>,
    Su: FnMut(&mut S),
    Td: FnMut(&mut S),
{
    #[inline]
    fn reduce(&mut self, acc: &mut A, value: T, index: usize, key: &K) -> Outcome<()> {
        self.inner.reduce(acc, value, index, key)
    }

    fn setup(&mut self) {
        self.inner.setup();
        (self.on_setup)(&mut self.inner);
    }

    fn teardown(&mut self) {
        self.inner.teardown();
        (self.on_teardown)(&mut self.inner);
    }

    fn is_stateful(&self) -> bool {
        true
    }
}

impl<S: std::fmt::Debug, Su, Td> std::fmt::Debug for Hooked<S, Su, Td> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooked")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
