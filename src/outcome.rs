/// The verdict a step gives for one element of a traversal.
///
/// [`Value`](Outcome::Value) passes the (possibly transformed) element on to
/// whatever comes next in the pipeline. The remaining variants all filter the
/// element out, each making a different claim about the elements that follow:
///
/// - [`Skip`](Outcome::Skip): only this element is dropped. The traversal
///   moves on to the next one.
/// - [`SkipRest`](Outcome::SkipRest): this element and everything after it
///   are dropped. The traversal ends.
/// - [`SkipUntil(at)`](Outcome::SkipUntil): every element before index `at`
///   is dropped, and the traversal resumes there. The target must lie
///   strictly ahead of the current index; a jump at or behind the current
///   position would re-visit elements, which the engine never does.
///
/// How far the traversal actually advances is decided solely by
/// [`next_index`](Outcome::next_index).
///
/// # Examples
///
/// ```
/// use onepass::Outcome;
///
/// let doubled: Outcome<i32> = Outcome::Value(2).map(|num| num * 2);
/// assert_eq!(doubled, Outcome::Value(4));
///
/// assert!(Outcome::<i32>::Skip.is_filtered());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The element survives, carrying this value.
    Value(T),
    /// Drop this element only.
    Skip,
    /// Drop this element and end the traversal.
    SkipRest,
    /// Drop everything before the given index and resume there.
    SkipUntil(usize),
}

impl<T> Outcome<T> {
    /// Returns `true` if the element survived.
    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    /// Returns `true` if the element was filtered out, whichever way.
    #[inline]
    pub fn is_filtered(&self) -> bool {
        !self.is_value()
    }

    /// Transforms the carried value, leaving the filtering variants as-is.
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Value(value) => Outcome::Value(f(value)),
            Outcome::Skip => Outcome::Skip,
            Outcome::SkipRest => Outcome::SkipRest,
            Outcome::SkipUntil(at) => Outcome::SkipUntil(at),
        }
    }

    /// Extracts the carried value, if any.
    #[inline]
    pub fn value(self) -> Option<T> {
        match self {
            Outcome::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Computes the index the traversal moves to after this verdict was
    /// given at `index`, in a collection of `len` elements.
    ///
    /// Jump targets are clamped to `len`, so a step may answer
    /// `SkipUntil(usize::MAX)` to mean "the end" without knowing the length.
    /// A target at or behind `index` panics in debug builds; release builds
    /// fall back to a plain one-step advance.
    ///
    /// # Examples
    ///
    /// ```
    /// use onepass::Outcome;
    ///
    /// assert_eq!(Outcome::Value(7).next_index(2, 10), 3);
    /// assert_eq!(Outcome::<i32>::Skip.next_index(2, 10), 3);
    /// assert_eq!(Outcome::<i32>::SkipRest.next_index(2, 10), 10);
    /// assert_eq!(Outcome::<i32>::SkipUntil(6).next_index(2, 10), 6);
    /// assert_eq!(Outcome::<i32>::SkipUntil(usize::MAX).next_index(2, 10), 10);
    /// ```
    pub fn next_index(&self, index: usize, len: usize) -> usize {
        match *self {
            Outcome::Value(_) | Outcome::Skip => index + 1,
            Outcome::SkipRest => len,
            Outcome::SkipUntil(at) => {
                debug_assert!(
                    at > index,
                    "jump target {at} does not advance past index {index}"
                );

                if at > index { at.min(len) } else { index + 1 }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;

    #[test]
    fn single_step_advance() {
        assert_eq!(Outcome::Value("a").next_index(0, 5), 1);
        assert_eq!(Outcome::<()>::Skip.next_index(3, 5), 4);
    }

    #[test]
    fn skip_rest_lands_on_len() {
        assert_eq!(Outcome::<()>::SkipRest.next_index(0, 5), 5);
        assert_eq!(Outcome::<()>::SkipRest.next_index(4, 5), 5);
    }

    #[test]
    fn jump_is_clamped() {
        assert_eq!(Outcome::<()>::SkipUntil(3).next_index(0, 5), 3);
        assert_eq!(Outcome::<()>::SkipUntil(99).next_index(0, 5), 5);
        assert_eq!(Outcome::<()>::SkipUntil(usize::MAX).next_index(2, 5), 5);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "does not advance")]
    fn backwards_jump_is_rejected() {
        let _ = Outcome::<()>::SkipUntil(1).next_index(3, 10);
    }

    #[test]
    fn map_preserves_filtering() {
        assert_eq!(Outcome::Value(2).map(|num| num + 1), Outcome::Value(3));
        assert_eq!(Outcome::<i32>::Skip.map(|num| num + 1), Outcome::Skip);
        assert_eq!(
            Outcome::<i32>::SkipUntil(4).map(|num| num + 1),
            Outcome::SkipUntil(4)
        );
    }

    #[test]
    fn value_extraction() {
        assert_eq!(Outcome::Value(1).value(), Some(1));
        assert_eq!(Outcome::<i32>::SkipRest.value(), None);
    }
}
