use crate::{
    Fused, Outcome,
    assert_reduce, assert_step,
    steps::{Hooked, Resettable},
};

/// Examines one element at a time and gives a verdict for each.
///
/// This trait requires one core method:
///
/// - [`apply`](Step::apply): consumes an element together with its position
///   and key, and returns an [`Outcome`] saying what the element became and
///   how the traversal should advance.
///
/// Any `FnMut(T) -> U` closure is already a `Step` that transforms every
/// element and never filters. Steps that filter, carry state, or look at
/// positions are built with the constructors in [`steps`](crate::steps) or by
/// implementing this trait directly.
///
/// # Lifecycle
///
/// A step may hold working state (a seen-set, a quota, an open resource).
/// The engine brackets every traversal with [`setup`](Step::setup) before the
/// first element and [`teardown`](Step::teardown) after the last one, and
/// `teardown` still runs when the traversal unwinds partway. Both default to
/// doing nothing. [`is_stateful`](Step::is_stateful) tells composite steps
/// which members actually need those calls; it defaults to `false` and must
/// be overridden by any implementation whose verdicts depend on what it has
/// already seen.
///
/// # Example
///
/// Suppose we are scoring a stream of dice rolls and want to drop everything
/// after the first pair of sixes:
///
/// ```
/// use onepass::{Outcome, Step, engine};
///
/// struct UntilDoubleSix {
///     last_was_six: bool,
/// }
///
/// impl<K> Step<K, u8> for UntilDoubleSix {
///     type Out = u8;
///
///     fn apply(&mut self, roll: u8, _index: usize, _key: &K) -> Outcome<u8> {
///         if roll == 6 && self.last_was_six {
///             return Outcome::SkipRest;
///         }
///
///         self.last_was_six = roll == 6;
///         Outcome::Value(roll)
///     }
///
///     fn is_stateful(&self) -> bool {
///         true
///     }
/// }
///
/// let rolls = vec![3, 6, 2, 6, 6, 5, 1];
/// let kept = engine::map(rolls, UntilDoubleSix { last_was_six: false });
///
/// assert_eq!(kept, [3, 6, 2, 6]);
/// ```
pub trait Step<K, T> {
    /// The type an element becomes after passing through this step.
    type Out;

    /// Gives the verdict for one element.
    ///
    /// `index` is the element's position in the traversal order of the
    /// collection being driven, and `key` is its key there. For sequences
    /// the two coincide; for keyed maps `index` is the entry's position and
    /// `key` its map key.
    fn apply(&mut self, value: T, index: usize, key: &K) -> Outcome<Self::Out>;

    /// Called once before the first element of every traversal.
    fn setup(&mut self) {}

    /// Called once after every traversal, including ones that unwind.
    fn teardown(&mut self) {}

    /// Whether this step's verdicts depend on previously seen elements.
    ///
    /// Composite steps use this to find the members whose lifecycle hooks
    /// are worth calling.
    fn is_stateful(&self) -> bool {
        false
    }

    /// Fuses this step with `next`, feeding every surviving value onward.
    ///
    /// Filtering verdicts from either member pass through unchanged, so an
    /// early [`SkipRest`](Outcome::SkipRest) anywhere in the chain still ends
    /// the whole traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use onepass::{Step, engine, steps};
    ///
    /// let odds_squared = engine::map(
    ///     vec![1, 2, 3, 4, 5],
    ///     steps::filter(|num: &i32| num % 2 != 0).pipe(|num: i32| num * num),
    /// );
    ///
    /// assert_eq!(odds_squared, [1, 9, 25]);
    /// ```
    #[inline]
    fn pipe<N>(self, next: N) -> Fused<Self, N>
    where
        Self: Sized,
        N: Step<K, Self::Out>,
    {
        assert_step(Fused::new(self, next))
    }

    /// Attaches setup and teardown hooks around this step.
    ///
    /// The hooks receive the wrapped step, so they can reset or inspect its
    /// state. The step's own lifecycle runs first, then the attached hook;
    /// this holds for setup and teardown alike, so stacking `with_hooks`
    /// calls runs them innermost-first.
    ///
    /// # Examples
    ///
    /// ```
    /// use onepass::{Step, engine, steps};
    ///
    /// // Deduplicate, starting from a clean slate on every traversal.
    /// let mut uniq = steps::uniq::<i32>().with_hooks(|uniq| uniq.clear(), |_| {});
    ///
    /// assert_eq!(engine::map(vec![1, 1, 2], uniq.by_ref()), [1, 2]);
    /// assert_eq!(engine::map(vec![1, 1, 2], uniq.by_ref()), [1, 2]);
    /// ```
    #[inline]
    fn with_hooks<Su, Td>(self, on_setup: Su, on_teardown: Td) -> Hooked<Self, Su, Td>
    where
        Self: Sized,
        Su: FnMut(&mut Self),
        Td: FnMut(&mut Self),
    {
        assert_step(Hooked::new(self, on_setup, on_teardown))
    }

    /// Defers `reset` to the start of the traversal after a finished one.
    ///
    /// Unlike clearing in a teardown hook, the state of a finished traversal
    /// stays inspectable until the step is driven again.
    #[inline]
    fn resettable<R>(self, reset: R) -> Resettable<Self, R>
    where
        Self: Sized,
        R: FnMut(&mut Self),
    {
        assert_step(Resettable::new(self, reset))
    }

    /// Borrows this step, letting a traversal drive it without consuming it.
    ///
    /// State carried by the step survives across traversals this way, which
    /// is how a quota or a seen-set is made to span several runs on purpose.
    #[inline]
    fn by_ref(&mut self) -> ByRef<'_, Self>
    where
        Self: Sized,
    {
        ByRef(self)
    }
}

impl<K, T, U, F: FnMut(T) -> U> Step<K, T> for F {
    type Out = U;

    #[inline]
    fn apply(&mut self, value: T, _index: usize, _key: &K) -> Outcome<U> {
        Outcome::Value(self(value))
    }
}

/// A mutably borrowed [`Step`].
///
/// This `struct` is created by [`Step::by_ref()`]. See its documentation for
/// more.
#[derive(Debug)]
pub struct ByRef<'a, S: ?Sized>(pub(crate) &'a mut S);

impl<K, T, S: Step<K, T> + ?Sized> Step<K, T> for ByRef<'_, S> {
    type Out = S::Out;

    #[inline]
    fn apply(&mut self, value: T, index: usize, key: &K) -> Outcome<S::Out> {
        self.0.apply(value, index, key)
    }

    fn setup(&mut self) {
        self.0.setup();
    }

    fn teardown(&mut self) {
        self.0.teardown();
    }

    fn is_stateful(&self) -> bool {
        self.0.is_stateful()
    }
}

/// Folds accepted elements into an accumulator, one at a time.
///
/// The accumulator is mutated in place, so a verdict that filters an element
/// out leaves it untouched by construction. The verdict's carried value is
/// always `()`: [`Value(())`](Outcome::Value) means the element was folded
/// in, the other variants steer the traversal exactly as they do for
/// [`Step`].
///
/// Any `FnMut(&mut A, T)` closure is a `Reduce` that folds every element in
/// and never ends the traversal early. For reducers that give real verdicts,
/// see [`steps::reducing`](crate::steps::reducing).
///
/// # Examples
///
/// ```
/// use onepass::engine;
///
/// let total = engine::fold(vec![1, 2, 3], |acc: &mut i32, num: i32| *acc += num, 0);
/// assert_eq!(total, 6);
/// ```
pub trait Reduce<K, A, T> {
    /// Folds one element into the accumulator, or filters it out.
    fn reduce(&mut self, acc: &mut A, value: T, index: usize, key: &K) -> Outcome<()>;

    /// Called once before the first element of every traversal.
    fn setup(&mut self) {}

    /// Called once after every traversal, including ones that unwind.
    fn teardown(&mut self) {}

    /// Whether this reducer carries state of its own, besides the
    /// accumulator the engine hands it.
    fn is_stateful(&self) -> bool {
        false
    }

    /// Attaches setup and teardown hooks around this reducer.
    ///
    /// Existing lifecycle runs first, then the attached hook, same as
    /// [`Step::with_hooks`].
    #[inline]
    fn with_hooks<Su, Td>(self, on_setup: Su, on_teardown: Td) -> Hooked<Self, Su, Td>
    where
        Self: Sized,
        Su: FnMut(&mut Self),
        Td: FnMut(&mut Self),
    {
        assert_reduce(Hooked::new(self, on_setup, on_teardown))
    }

    /// Defers `reset` to the start of the traversal after a finished one.
    #[inline]
    fn resettable<R>(self, reset: R) -> Resettable<Self, R>
    where
        Self: Sized,
        R: FnMut(&mut Self),
    {
        assert_reduce(Resettable::new(self, reset))
    }
}

impl<K, A, T, F: FnMut(&mut A, T)> Reduce<K, A, T> for F {
    #[inline]
    fn reduce(&mut self, acc: &mut A, value: T, _index: usize, _key: &K) -> Outcome<()> {
        self(acc, value);
        Outcome::Value(())
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use crate::{Step, engine, steps};

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn closures_transform_every_element() {
        let tripled = engine::map(vec![1, 2, 3], |num: i32| num * 3);
        assert_eq!(tripled, [3, 6, 9]);
    }

    #[test]
    fn by_ref_keeps_state_across_traversals() {
        let mut quota = steps::limit(3);

        assert_eq!(engine::map(vec![1, 2], quota.by_ref()), [1, 2]);
        // One slot left from the first run.
        assert_eq!(engine::map(vec![3, 4, 5], quota.by_ref()), [3]);
    }

    #[test]
    fn fold_with_plain_closure() {
        let total_len = engine::fold(
            vec!["a", "b", "c"],
            |acc: &mut u32, word: &str| *acc += word.len() as u32,
            0,
        );
        assert_eq!(total_len, 3);
    }
}
