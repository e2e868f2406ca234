#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{boxed::Box, vec::Vec};

use crate::{Outcome, Step};

/// Two steps fused into one, feeding the first's survivors to the second.
///
/// This `struct` is created by [`Step::pipe()`]. See its documentation for
/// more.
#[derive(Debug, Clone)]
pub struct Fused<A, B> {
    first: A,
    second: B,
}

impl<A, B> Fused<A, B> {
    #[inline]
    pub(crate) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<K, T, A, B> Step<K, T> for Fused<A, B>
where
    A: Step<K, T>,
    B: Step<K, A::Out>,
{
    type Out = B::Out;

    #[inline]
    fn apply(&mut self, value: T, index: usize, key: &K) -> Outcome<B::Out> {
        match self.first.apply(value, index, key) {
            Outcome::Value(mid) => self.second.apply(mid, index, key),
            Outcome::Skip => Outcome::Skip,
            Outcome::SkipRest => Outcome::SkipRest,
            Outcome::SkipUntil(at) => Outcome::SkipUntil(at),
        }
    }

    fn setup(&mut self) {
        self.first.setup();
        self.second.setup();
    }

    fn teardown(&mut self) {
        self.first.teardown();
        self.second.teardown();
    }

    fn is_stateful(&self) -> bool {
        self.first.is_stateful() || self.second.is_stateful()
    }
}

/// Fuses any number of steps into one, right-nested.
///
/// `pipe![a, b, c]` is `a.pipe(b.pipe(c))`; a single step expands to itself
/// with no wrapper at all. The empty form is a compile error, since a pipe
/// with no members has no element type to speak of.
///
/// # Examples
///
/// ```
/// use onepass::{engine, pipe, steps};
///
/// let kept = engine::map(
///     vec![1, 2, 3, 4, 5, 6, 7],
///     pipe![
///         steps::skip(1),
///         steps::filter(|num: &i32| num % 2 == 0),
///         steps::limit(2),
///     ],
/// );
///
/// assert_eq!(kept, [2, 4]);
/// ```
#[macro_export]
macro_rules! pipe {
    ($single:expr $(,)?) => {
        $single
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::Step::pipe($first, $crate::pipe!($($rest),+))
    };
}

/// A boxed, value-preserving step, the unit of runtime pipe assembly.
#[cfg(feature = "alloc")]
pub type BoxStep<K, T> = Box<dyn Step<K, T, Out = T>>;

/// A pipe assembled at runtime from boxed steps.
///
/// Unlike [`Fused`], the member list is not known at compile time, so every
/// member must preserve the element type. Which members are stateful is
/// discovered once, at construction; the pipe's lifecycle hooks visit
/// exactly those members, in pipe order.
#[cfg(feature = "alloc")]
pub struct Pipe<K: 'static, T: 'static> {
    steps: Vec<BoxStep<K, T>>,
    stateful: Vec<usize>,
}

#[cfg(feature = "alloc")]
impl<K: 'static, T: 'static> Pipe<K, T> {
    /// Builds a pipe from its member steps.
    ///
    /// An empty list is allowed and behaves as an identity pipe.
    pub fn from_steps(steps: Vec<BoxStep<K, T>>) -> Self {
        let stateful = steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.is_stateful())
            .map(|(index, _)| index)
            .collect();

        Self { steps, stateful }
    }

    /// The number of member steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipe has no members.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(feature = "alloc")]
impl<K: 'static, T: 'static> Step<K, T> for Pipe<K, T> {
    type Out = T;

    fn apply(&mut self, value: T, index: usize, key: &K) -> Outcome<T> {
        let mut value = value;
        for step in &mut self.steps {
            match step.apply(value, index, key) {
                Outcome::Value(next) => value = next,
                Outcome::Skip => return Outcome::Skip,
                Outcome::SkipRest => return Outcome::SkipRest,
                Outcome::SkipUntil(at) => return Outcome::SkipUntil(at),
            }
        }

        Outcome::Value(value)
    }

    fn setup(&mut self) {
        for &member in &self.stateful {
            self.steps[member].setup();
        }
    }

    fn teardown(&mut self) {
        for &member in &self.stateful {
            self.steps[member].teardown();
        }
    }

    fn is_stateful(&self) -> bool {
        !self.stateful.is_empty()
    }
}

#[cfg(feature = "alloc")]
impl<K: 'static, T: 'static> std::fmt::Debug for Pipe<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipe")
            .field("len", &self.steps.len())
            .field("stateful", &self.stateful)
            .finish()
    }
}

/// Collapses a member list into a single boxed step.
///
/// A one-member list unwraps to the member itself, with no pipe around it.
#[cfg(feature = "alloc")]
pub(crate) fn fuse_steps<K: 'static, T: 'static>(mut steps: Vec<BoxStep<K, T>>) -> BoxStep<K, T> {
    if steps.len() == 1 {
        if let Some(only) = steps.pop() {
            return only;
        }
    }

    Box::new(Pipe::from_steps(steps))
}
