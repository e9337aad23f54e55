//! An ordered set of unique values backed by an AVL tree.
//!
//! Nodes live in an index arena with parent links, so cursors can step to
//! the next or previous element without keeping a stack.
//!
//! ```
//! use avl_ordered_set::OrderedSet;
//!
//! let mut set = OrderedSet::from([5, 3, 8, 1, 4, 7, 9]);
//! set.erase(&5);
//!
//! assert_eq!(set.lower_bound(&6).get(), Some(&7));
//! assert!(set.find(&2).is_end());
//! assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec![1, 3, 4, 7, 8, 9]);
//! ```
#![cfg_attr(all(test, feature = "bench"), feature(test))]
#[cfg(all(test, feature = "bench"))]
extern crate test;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod compare;
pub mod iterator;
pub mod set;
mod support;
mod tree;

pub use compare::{Compare, Natural};
pub use iterator::{Cursor, Iter, Range, Union};
pub use set::OrderedSet;

#[cfg(all(test, feature = "bench"))]
mod bench;
