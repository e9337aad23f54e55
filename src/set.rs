use super::compare::{Compare, Natural};
use super::iterator::{Cursor, Iter, Range, Union};
use super::tree::{AvlArena, AvlTree, NodeId};
use tracing::{debug, trace};

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// An ordered set of unique values kept in an AVL tree.
///
/// Values are ordered by a [`Compare`] implementation, [`Natural`] (the
/// value's own [`Ord`]) by default. Two values that compare neither less nor
/// greater than each other are the same element.
///
/// Positions are handed out as [`Cursor`]s. A cursor borrows the set, so the
/// set cannot be changed while one is alive; after a change, look the
/// position up again with [`find`](OrderedSet::find),
/// [`lower_bound`](OrderedSet::lower_bound) or [`begin`](OrderedSet::begin).
pub struct OrderedSet<T, C = Natural> {
    pub(crate) tree: AvlArena<T>,
    pub(crate) root: AvlTree,
    len: usize,
    compare: C,
}

impl<T: Ord> OrderedSet<T> {
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> OrderedSet<T, C>
where
    C: Compare<T>,
{
    pub fn with_comparator(compare: C) -> Self {
        Self {
            tree: AvlArena::new(),
            root: None,
            len: 0,
            compare,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Adds `value` unless an equal element is already present.
    ///
    /// Returns whether the set changed.
    pub fn insert(&mut self, value: T) -> bool {
        let mut current = match self.root {
            Some(root) => root,
            None => {
                self.root = Some(self.tree.alloc(value, None));
                self.len = 1;

                return true;
            }
        };

        loop {
            let node = self.tree.node(current);

            let (next_tree, goes_left) = if self.compare.less(&value, &node.value) {
                (node.left, true)
            } else if self.compare.less(&node.value, &value) {
                (node.right, false)
            } else {
                return false;
            };

            match next_tree {
                Some(next) => current = next,
                None => {
                    let leaf = self.tree.alloc(value, Some(current));

                    if goes_left {
                        self.tree.node_mut(current).left = Some(leaf);
                    } else {
                        self.tree.node_mut(current).right = Some(leaf);
                    }

                    self.len += 1;
                    self.root = self.tree.renew_up(Some(leaf));

                    return true;
                }
            }
        }
    }

    /// Removes the element equal to `value` and hands it back.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let mut target = self.locate(value)?;

        // Push the value down until it sits in a leaf, trading places with
        // the neighbour from the taller side each time.
        while let Some(replacement) = self.tree.replacement(target) {
            trace!(from = target, to = replacement, "moving value down for removal");
            self.tree.swap_values(target, replacement);
            target = replacement;
        }

        let parent = self.tree.parent(target);

        if let Some(parent) = parent {
            self.tree.detach(parent, target);
        }

        let taken_value = self.tree.release(target);
        self.len -= 1;
        self.root = self.tree.renew_up(parent);
        debug_assert_eq!(self.tree.live(), self.len);

        Some(taken_value)
    }

    /// Removes the element equal to `value`, returning whether it was present.
    pub fn erase(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.locate(value).is_some()
    }

    pub fn get(&self, value: &T) -> Option<&T> {
        self.locate(value).map(|id| self.tree.value(id))
    }

    /// Cursor on the element equal to `value`, or [`end`](OrderedSet::end).
    pub fn find(&self, value: &T) -> Cursor<'_, T, C> {
        Cursor::new(self, self.locate(value))
    }

    /// Cursor on the least element not less than `value`, or
    /// [`end`](OrderedSet::end) when every element is less.
    pub fn lower_bound(&self, value: &T) -> Cursor<'_, T, C> {
        let mut current = match self.root {
            Some(root) => root,
            None => return self.end(),
        };

        loop {
            let node = self.tree.node(current);

            let next_tree = if self.compare.less(&node.value, value) {
                node.right
            } else if self.compare.less(value, &node.value) {
                node.left
            } else {
                break;
            };

            match next_tree {
                Some(next) => current = next,
                None => break,
            }
        }

        let mut bound = Some(current);

        while let Some(id) = bound {
            if !self.compare.less(self.tree.value(id), value) {
                break;
            }

            bound = self.tree.parent(id);
        }

        Cursor::new(self, bound)
    }

    fn locate(&self, value: &T) -> Option<NodeId> {
        let mut current_tree = self.root;

        while let Some(current) = current_tree {
            let node = self.tree.node(current);

            if self.compare.less(value, &node.value) {
                current_tree = node.left;
            } else if self.compare.less(&node.value, value) {
                current_tree = node.right;
            } else {
                return Some(current);
            }
        }

        None
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    pub fn append(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }

        let other_tree = std::mem::take(&mut other.tree);
        other.root = None;
        other.len = 0;

        for value in other_tree.into_values() {
            self.insert(value);
        }
    }

    pub fn union<'a>(&'a self, other: &'a Self) -> Union<'a, T, C, Iter<'a, T>> {
        Union::new(self.iter(), other.iter(), &self.compare)
    }

    pub fn intersection<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = &'a T> + 'a {
        self.iter().filter(move |&value| other.contains(value))
    }

    pub fn difference<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = &'a T> + 'a {
        self.iter().filter(move |&value| !other.contains(value))
    }

    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a Self,
    ) -> impl Iterator<Item = &'a T> + 'a {
        Union::new(self.difference(other), other.difference(self), &self.compare)
    }

    /// Ascending iterator over the elements not less than `value`.
    pub fn range_from(&self, value: &T) -> Range<'_, T> {
        self.lower_bound(value).iter()
    }
}

impl<T, C> OrderedSet<T, C> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing set");

        self.tree.clear();
        self.root = None;
        self.len = 0;
    }

    /// Cursor on the least element, or [`end`](OrderedSet::end) when empty.
    pub fn begin(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, self.root.map(|root| self.tree.leftmost(root)))
    }

    /// The past-the-end cursor. Stepping back from it reaches the greatest
    /// element.
    pub fn end(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, None)
    }

    pub fn first(&self) -> Option<&T> {
        self.root.map(|root| self.tree.value(self.tree.leftmost(root)))
    }

    pub fn last(&self) -> Option<&T> {
        self.root.map(|root| self.tree.value(self.tree.rightmost(root)))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.tree, self.root, self.len)
    }
}

impl<T: Clone, C: Clone> Clone for OrderedSet<T, C> {
    fn clone(&self) -> Self {
        let mut tree = AvlArena::with_capacity(self.len);
        let root = self.tree.copy_into(self.root, &mut tree);

        debug!(len = self.len, "deep copied set");

        Self {
            tree,
            root,
            len: self.len,
            compare: self.compare.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clear();
        self.root = source.tree.copy_into(source.root, &mut self.tree);
        self.len = source.len;
        self.compare = source.compare.clone();

        debug!(len = self.len, "deep copied set");
    }
}

// Refit and copied from quickcheck
// https://docs.rs/quickcheck/0.8.5/src/quickcheck/arbitrary.rs.html#385-395
#[cfg(test)]
impl<T: Arbitrary + Ord> Arbitrary for OrderedSet<T> {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let vec: Vec<T> = Arbitrary::arbitrary(g);
        vec.into_iter().collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let vec: Vec<T> = self.iter().cloned().collect();
        Box::new(vec.shrink().map(|v| v.into_iter().collect::<Self>()))
    }
}
