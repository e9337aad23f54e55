use crate::compare::Compare;
use crate::set::OrderedSet;
use crate::tree::{AvlArena, AvlTree};
use core::iter::{FusedIterator, Peekable};
use std::fmt;
use std::ptr;

/// A position in an [`OrderedSet`]: either an element or the past-the-end
/// position.
///
/// Cursors walk the tree through parent links, without a stack. Stepping past
/// either end of the set is a caller error and panics:
///
/// * [`value`](Cursor::value) and [`move_next`](Cursor::move_next) on the end
///   position,
/// * [`move_prev`](Cursor::move_prev) on the first element or on the end
///   position of an empty set.
///
/// Two cursors are equal when they sit on the same position of the same set.
///
/// A cursor holds a shared borrow of its set, so the set cannot be changed
/// while the cursor is in use:
///
/// ```compile_fail
/// use avl_ordered_set::OrderedSet;
///
/// let mut set = OrderedSet::from([1, 5, 9]);
/// let cursor = set.find(&5);
///
/// set.erase(&5);
/// cursor.value();
/// ```
///
/// Look the position up again after the change instead:
///
/// ```
/// use avl_ordered_set::OrderedSet;
///
/// let mut set = OrderedSet::from([1, 5, 9]);
/// assert_eq!(set.find(&5).value(), &5);
///
/// set.erase(&5);
/// assert!(set.find(&5).is_end());
/// assert_eq!(set.lower_bound(&5).value(), &9);
/// ```
pub struct Cursor<'a, T, C> {
    set: &'a OrderedSet<T, C>,
    node: AvlTree,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(crate) fn new(set: &'a OrderedSet<T, C>, node: AvlTree) -> Self {
        Self { set, node }
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// The element under the cursor, `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        let set: &'a OrderedSet<T, C> = self.set;
        let tree = &set.tree;
        self.node.map(|id| tree.value(id))
    }

    /// The element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    pub fn value(&self) -> &'a T {
        match self.get() {
            Some(value) => value,
            None => panic!("dereferenced the end cursor"),
        }
    }

    /// Steps to the next greater element, or to the end position after the
    /// greatest one.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    pub fn move_next(&mut self) {
        match self.node {
            Some(id) => self.node = self.set.tree.successor(id),
            None => panic!("advanced the end cursor"),
        }
    }

    /// Steps to the next smaller element. From the end position this is the
    /// greatest element.
    ///
    /// # Panics
    ///
    /// Panics on the first element, or at the end of an empty set.
    pub fn move_prev(&mut self) {
        let tree = &self.set.tree;

        let prev = match self.node {
            Some(id) => tree.predecessor(id),
            None => self.set.root.map(|root| tree.rightmost(root)),
        };

        match prev {
            Some(_) => self.node = prev,
            None => panic!("moved the cursor before the first element"),
        }
    }

    /// The elements from this position up to the end of the set, in
    /// ascending order.
    pub fn iter(&self) -> Range<'a, T> {
        let set: &'a OrderedSet<T, C> = self.set;
        let tree = &set.tree;
        let back = self.node.and(set.root.map(|root| tree.rightmost(root)));

        Range::new(tree, self.node, back)
    }
}

impl<'a, T, C> Clone for Cursor<'a, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, C> Copy for Cursor<'a, T, C> {}

impl<'a, T, C> PartialEq for Cursor<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.set, other.set) && self.node == other.node
    }
}

impl<'a, T, C> Eq for Cursor<'a, T, C> {}

impl<'a, T: fmt::Debug, C> fmt::Debug for Cursor<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Cursor").field(value).finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}

/// Two-ended in-order walk shared by [`Iter`] and [`Range`].
///
/// `front` and `back` are the next nodes to yield from either side; both are
/// cleared once they meet.
struct Walk<'a, T> {
    tree: &'a AvlArena<T>,
    front: AvlTree,
    back: AvlTree,
}

impl<'a, T> Walk<'a, T> {
    fn finish_if_met(&mut self) -> bool {
        if self.front == self.back {
            self.front = None;
            self.back = None;

            true
        } else {
            false
        }
    }

    fn next(&mut self) -> Option<&'a T> {
        let current = self.front?;

        if !self.finish_if_met() {
            self.front = self.tree.successor(current);
        }

        Some(self.tree.value(current))
    }

    fn next_back(&mut self) -> Option<&'a T> {
        let current = self.back?;

        if !self.finish_if_met() {
            self.back = self.tree.predecessor(current);
        }

        Some(self.tree.value(current))
    }
}

impl<'a, T> Clone for Walk<'a, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

/// In-order iterator over a whole set, double ended and exact size.
pub struct Iter<'a, T> {
    walk: Walk<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a AvlArena<T>, root: AvlTree, len: usize) -> Self {
        let walk = Walk {
            tree,
            front: root.map(|root| tree.leftmost(root)),
            back: root.map(|root| tree.rightmost(root)),
        };

        Self {
            walk,
            remaining: len,
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.walk.next()?;
        self.remaining -= 1;

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let value = self.walk.next_back()?;
        self.remaining -= 1;

        Some(value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// In-order iterator from a cursor position to the end of the set, double
/// ended.
pub struct Range<'a, T> {
    walk: Walk<'a, T>,
}

impl<'a, T> Range<'a, T> {
    pub(crate) fn new(tree: &'a AvlArena<T>, front: AvlTree, back: AvlTree) -> Self {
        Self {
            walk: Walk { tree, front, back },
        }
    }
}

impl<'a, T> Clone for Range<'a, T> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
        }
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next()
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.walk.next_back()
    }
}

impl<'a, T> FusedIterator for Range<'a, T> {}

/// Merges two ascending iterators into one, yielding shared elements once.
pub struct Union<'a, T: 'a, C, I: Iterator<Item = &'a T>> {
    left_iter: Peekable<I>,
    right_iter: Peekable<I>,
    compare: &'a C,
}

impl<'a, T: 'a, C, I: Iterator<Item = &'a T>> Union<'a, T, C, I> {
    pub(crate) fn new(left_iter: I, right_iter: I, compare: &'a C) -> Self {
        Self {
            left_iter: left_iter.peekable(),
            right_iter: right_iter.peekable(),
            compare,
        }
    }
}

impl<'a, T: 'a, C, I> Iterator for Union<'a, T, C, I>
where
    C: Compare<T>,
    I: Iterator<Item = &'a T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(&left_value) = self.left_iter.peek() {
            if let Some(&right_value) = self.right_iter.peek() {
                if self.compare.less(left_value, right_value) {
                    self.left_iter.next()
                } else if self.compare.less(right_value, left_value) {
                    self.right_iter.next()
                } else {
                    self.right_iter.next();
                    self.left_iter.next()
                }
            } else {
                self.left_iter.next()
            }
        } else if self.right_iter.peek().is_some() {
            self.right_iter.next()
        } else {
            None
        }
    }
}
