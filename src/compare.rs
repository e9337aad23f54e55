/// A strict weak ordering over `T`.
///
/// The set only ever asks "is `a` ordered before `b`?". Two values for which
/// neither `less(a, b)` nor `less(b, a)` holds are treated as the same element.
pub trait Compare<T: ?Sized> {
    fn less(&self, a: &T, b: &T) -> bool;
}

/// Orders values by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
