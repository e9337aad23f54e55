use super::compare::{Compare, Natural};
use super::iterator::Iter;
use super::set::OrderedSet;
use std::fmt;
use std::iter::FromIterator;

impl<T: Ord> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();

        for i in iter {
            set.insert(i);
        }

        set
    }
}

impl<T, C: Compare<T>> Extend<T> for OrderedSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for i in iter {
            self.insert(i);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OrderedSet<T, Natural> {
    fn from(values: [T; N]) -> Self {
        IntoIterator::into_iter(values).collect()
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Sets are equal when they hold equal elements in the same order, whatever
/// their tree shapes.
impl<T: PartialEq, C> PartialEq for OrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for OrderedSet<T, C> {}

#[cfg(test)]
mod specs {
    use super::*;

    #[test]
    fn literal_arrays_build_sets() {
        let set = OrderedSet::from([3, 1, 2, 3]);

        assert_eq!(set.len(), 3);
        assert_eq!(format!("{:?}", set), "{1, 2, 3}");
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let ascending = (0..64).collect::<OrderedSet<_>>();
        let descending = (0..64).rev().collect::<OrderedSet<_>>();

        assert_eq!(ascending, descending);
        assert_ne!(ascending, (0..63).collect::<OrderedSet<_>>());
    }

    #[test]
    fn extend_and_borrowed_iteration() {
        let mut set = OrderedSet::default();
        set.extend(vec![2, 1, 2]);

        let mut seen = Vec::new();
        for value in &set {
            seen.push(*value);
        }

        assert_eq!(seen, vec![1, 2]);
    }
}
