use std::cmp::max;
use std::mem::swap;
use tracing::trace;

pub type NodeId = usize;

pub type AvlTree = Option<NodeId>;

#[derive(Debug, PartialEq, Clone)]
pub struct AvlNode<T> {
    pub value: T,
    pub left: AvlTree,
    pub right: AvlTree,
    pub parent: AvlTree,
    pub height: usize,
}

/// Node storage for a single tree.
///
/// Links between nodes are slot indices. Released slots are pushed on `free`
/// and handed out again by the next `alloc`.
#[derive(Debug)]
pub struct AvlArena<T> {
    slots: Vec<Option<AvlNode<T>>>,
    free: Vec<NodeId>,
}

impl<T> Default for AvlArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    pub fn alloc(&mut self, value: T, parent: AvlTree) -> NodeId {
        let node = AvlNode {
            value,
            left: None,
            right: None,
            parent,
            height: 1,
        };

        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Empties the slot and returns its value. The caller unlinks it first.
    pub fn release(&mut self, id: NodeId) -> T {
        match self.slots[id].take() {
            Some(node) => {
                self.free.push(id);
                node.value
            }
            None => unreachable!("slot {} released twice", id),
        }
    }

    pub fn node(&self, id: NodeId) -> &AvlNode<T> {
        match self.slots[id] {
            Some(ref node) => node,
            None => unreachable!("link to vacant slot {}", id),
        }
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut AvlNode<T> {
        match self.slots[id] {
            Some(ref mut node) => node,
            None => unreachable!("link to vacant slot {}", id),
        }
    }

    pub fn value(&self, id: NodeId) -> &T {
        &self.node(id).value
    }

    pub fn left(&self, id: NodeId) -> AvlTree {
        self.node(id).left
    }

    pub fn right(&self, id: NodeId) -> AvlTree {
        self.node(id).right
    }

    pub fn parent(&self, id: NodeId) -> AvlTree {
        self.node(id).parent
    }

    pub fn height(&self, tree: AvlTree) -> usize {
        tree.map_or(0, |id| self.node(id).height)
    }

    pub fn left_height(&self, id: NodeId) -> usize {
        self.height(self.left(id))
    }

    pub fn right_height(&self, id: NodeId) -> usize {
        self.height(self.right(id))
    }

    pub fn update_height(&mut self, id: NodeId) {
        let height = 1 + max(self.left_height(id), self.right_height(id));
        self.node_mut(id).height = height;
    }

    pub fn balance_factor(&self, id: NodeId) -> isize {
        self.left_height(id) as isize - self.right_height(id) as isize
    }

    /// Exchanges the stored values of two distinct nodes, leaving links alone.
    pub fn swap_values(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }

        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(high);

        match (head[low].as_mut(), tail[0].as_mut()) {
            (Some(low_node), Some(high_node)) => swap(&mut low_node.value, &mut high_node.value),
            _ => unreachable!("value swap through a vacant slot"),
        }
    }

    pub fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.left(id) {
            id = left;
        }

        id
    }

    pub fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.right(id) {
            id = right;
        }

        id
    }

    /// In-order successor, `None` past the maximum.
    pub fn successor(&self, id: NodeId) -> AvlTree {
        if let Some(right) = self.right(id) {
            return Some(self.leftmost(right));
        }

        let mut current = id;

        while let Some(parent) = self.parent(current) {
            if self.right(parent) != Some(current) {
                return Some(parent);
            }

            current = parent;
        }

        None
    }

    /// In-order predecessor, `None` before the minimum.
    pub fn predecessor(&self, id: NodeId) -> AvlTree {
        if let Some(left) = self.left(id) {
            return Some(self.rightmost(left));
        }

        let mut current = id;

        while let Some(parent) = self.parent(current) {
            if self.left(parent) != Some(current) {
                return Some(parent);
            }

            current = parent;
        }

        None
    }

    /// Points whichever child slot of `parent` held `old` at `new`.
    fn replace_child(&mut self, parent: AvlTree, old: NodeId, new: NodeId) {
        if let Some(parent) = parent {
            let parent_node = self.node_mut(parent);

            if parent_node.left == Some(old) {
                parent_node.left = Some(new);
            } else {
                parent_node.right = Some(new);
            }
        }
    }

    /// Clears the child slot of `parent` that holds `child`.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) {
        let parent_node = self.node_mut(parent);

        if parent_node.left == Some(child) {
            parent_node.left = None;
        } else {
            parent_node.right = None;
        }
    }

    /// The neighbour that can stand in for `id` when it is removed: the
    /// predecessor when the left side is at least as tall, otherwise the
    /// successor. `None` for a leaf.
    pub fn replacement(&self, id: NodeId) -> AvlTree {
        if self.left_height(id) >= self.right_height(id) {
            self.left(id).map(|left| self.rightmost(left))
        } else {
            self.right(id).map(|right| self.leftmost(right))
        }
    }

    /// Consumes the arena, yielding the stored values in slot order.
    pub fn into_values(self) -> impl Iterator<Item = T> {
        self.slots.into_iter().flatten().map(|node| node.value)
    }

    /// The right child becomes the subtree root and `id` its left child.
    /// Returns the new subtree root, or `None` when there is no right child.
    pub fn rotate_left(&mut self, id: NodeId) -> AvlTree {
        let right = self.right(id)?;
        let right_left = self.left(right);
        let parent = self.parent(id);

        trace!(node = id, pivot = right, "single left rotation");

        self.node_mut(id).right = right_left;
        if let Some(right_left) = right_left {
            self.node_mut(right_left).parent = Some(id);
        }

        self.node_mut(right).left = Some(id);
        self.node_mut(id).parent = Some(right);
        self.node_mut(right).parent = parent;
        self.replace_child(parent, id, right);

        self.update_height(id);
        self.update_height(right);

        Some(right)
    }

    /// The left child becomes the subtree root and `id` its right child.
    /// Returns the new subtree root, or `None` when there is no left child.
    pub fn rotate_right(&mut self, id: NodeId) -> AvlTree {
        let left = self.left(id)?;
        let left_right = self.right(left);
        let parent = self.parent(id);

        trace!(node = id, pivot = left, "single right rotation");

        self.node_mut(id).left = left_right;
        if let Some(left_right) = left_right {
            self.node_mut(left_right).parent = Some(id);
        }

        self.node_mut(left).right = Some(id);
        self.node_mut(id).parent = Some(left);
        self.node_mut(left).parent = parent;
        self.replace_child(parent, id, left);

        self.update_height(id);
        self.update_height(left);

        Some(left)
    }

    /// The right child's left child becomes the subtree root.
    pub fn big_rotate_left(&mut self, id: NodeId) -> AvlTree {
        let right = self.right(id)?;

        trace!(node = id, "double left rotation");

        self.rotate_right(right)?;
        self.rotate_left(id)
    }

    /// The left child's right child becomes the subtree root.
    pub fn big_rotate_right(&mut self, id: NodeId) -> AvlTree {
        let left = self.left(id)?;

        trace!(node = id, "double right rotation");

        self.rotate_left(left)?;
        self.rotate_right(id)
    }

    /// Restores the balance of `id`, assuming both of its subtrees are
    /// balanced, and returns the root of the resulting subtree.
    pub fn rotate(&mut self, id: NodeId) -> NodeId {
        let rotated = match self.balance_factor(id) {
            -1..=1 => None,
            factor if factor < 0 => {
                let right = self.right(id);

                match right {
                    Some(right) if self.left_height(right) > self.right_height(right) => {
                        self.big_rotate_left(id)
                    }
                    _ => self.rotate_left(id),
                }
            }
            _ => {
                let left = self.left(id);

                match left {
                    Some(left) if self.right_height(left) > self.left_height(left) => {
                        self.big_rotate_right(id)
                    }
                    _ => self.rotate_right(id),
                }
            }
        };

        rotated.unwrap_or(id)
    }

    /// Walks from `start` to the root, refreshing heights and rotating where
    /// needed. Returns the root of the whole tree.
    pub fn renew_up(&mut self, start: AvlTree) -> AvlTree {
        let mut current = start?;

        loop {
            self.update_height(current);
            current = self.rotate(current);

            match self.parent(current) {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }
}

impl<T: Clone> AvlArena<T> {
    /// Copies the tree under `root` into `target` in pre-order, keeping the
    /// cached heights. Returns the root of the copy.
    pub fn copy_into(&self, root: AvlTree, target: &mut AvlArena<T>) -> AvlTree {
        let root = root?;
        let new_root = target.alloc(self.value(root).clone(), None);
        let mut pending = vec![(root, new_root)];

        while let Some((source, copy)) = pending.pop() {
            let source_node = self.node(source);
            target.node_mut(copy).height = source_node.height;

            let (left, right) = (source_node.left, source_node.right);

            if let Some(right) = right {
                let right_copy = target.alloc(self.value(right).clone(), Some(copy));
                target.node_mut(copy).right = Some(right_copy);
                pending.push((right, right_copy));
            }

            if let Some(left) = left {
                let left_copy = target.alloc(self.value(left).clone(), Some(copy));
                target.node_mut(copy).left = Some(left_copy);
                pending.push((left, left_copy));
            }
        }

        Some(new_root)
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    fn chain(arena: &mut AvlArena<u32>, values: &[u32], right_leaning: bool) -> NodeId {
        let root = arena.alloc(values[0], None);
        let mut current = root;

        for &value in &values[1..] {
            let child = arena.alloc(value, Some(current));

            if right_leaning {
                arena.node_mut(current).right = Some(child);
            } else {
                arena.node_mut(current).left = Some(child);
            }

            current = child;
        }

        let mut walk = Some(current);
        while let Some(id) = walk {
            arena.update_height(id);
            walk = arena.parent(id);
        }

        root
    }

    fn in_order(arena: &AvlArena<u32>, root: NodeId) -> Vec<u32> {
        let mut values = Vec::new();
        let mut current = Some(arena.leftmost(root));

        while let Some(id) = current {
            values.push(*arena.value(id));
            current = arena.successor(id);
        }

        values
    }

    #[test]
    fn single_left_rotation_on_right_chain() {
        let mut arena = AvlArena::new();
        let root = chain(&mut arena, &[1, 2, 3], true);

        let new_root = arena.renew_up(Some(root)).unwrap();

        assert_eq!(*arena.value(new_root), 2);
        assert_eq!(arena.node(new_root).height, 2);
        assert_eq!(arena.parent(new_root), None);
        assert_eq!(in_order(&arena, new_root), vec![1, 2, 3]);
    }

    #[test]
    fn single_right_rotation_on_left_chain() {
        let mut arena = AvlArena::new();
        let root = chain(&mut arena, &[3, 2, 1], false);

        let new_root = arena.rotate(root);

        assert_eq!(*arena.value(new_root), 2);
        assert_eq!(arena.balance_factor(new_root), 0);
        assert_eq!(in_order(&arena, new_root), vec![1, 2, 3]);
    }

    #[test]
    fn double_rotation_on_zig_zag() {
        let mut arena = AvlArena::new();
        let root = arena.alloc(1, None);
        let right = arena.alloc(3, Some(root));
        let right_left = arena.alloc(2, Some(right));
        arena.node_mut(root).right = Some(right);
        arena.node_mut(right).left = Some(right_left);
        arena.update_height(right);
        arena.update_height(root);

        let new_root = arena.rotate(root);

        assert_eq!(new_root, right_left);
        assert_eq!(arena.left(new_root), Some(root));
        assert_eq!(arena.right(new_root), Some(right));
        assert_eq!(arena.parent(root), Some(new_root));
        assert_eq!(arena.parent(right), Some(new_root));
        assert_eq!(arena.node(new_root).height, 2);
    }

    #[test]
    fn double_right_rotation_on_zig_zag() {
        let mut arena = AvlArena::new();
        let top = arena.alloc(10, None);
        let root = arena.alloc(3, Some(top));
        let left = arena.alloc(1, Some(root));
        let left_right = arena.alloc(2, Some(left));
        arena.node_mut(top).left = Some(root);
        arena.node_mut(root).left = Some(left);
        arena.node_mut(left).right = Some(left_right);
        arena.update_height(left);
        arena.update_height(root);
        arena.update_height(top);

        let new_root = arena.rotate(root);

        assert_eq!(new_root, left_right);
        assert_eq!(arena.left(new_root), Some(left));
        assert_eq!(arena.right(new_root), Some(root));
        assert_eq!(arena.parent(left), Some(new_root));
        assert_eq!(arena.parent(root), Some(new_root));
        assert_eq!(arena.left(left), None);
        assert_eq!(arena.right(left), None);
        assert_eq!(arena.left(root), None);
        assert_eq!(arena.node(new_root).height, 2);
        assert_eq!(arena.left(top), Some(new_root));
        assert_eq!(arena.parent(new_root), Some(top));
        assert_eq!(in_order(&arena, top), vec![1, 2, 3, 10]);
    }

    #[test]
    fn rotation_relinks_grandparent() {
        let mut arena = AvlArena::new();
        let top = arena.alloc(10, None);
        let chain_root = chain(&mut arena, &[1, 2, 3], true);
        arena.node_mut(top).left = Some(chain_root);
        arena.node_mut(chain_root).parent = Some(top);

        let new_local = arena.rotate(chain_root);

        assert_eq!(arena.left(top), Some(new_local));
        assert_eq!(arena.parent(new_local), Some(top));
    }

    #[test]
    fn balanced_node_is_left_alone() {
        let mut arena = AvlArena::new();
        let root = chain(&mut arena, &[2, 1], false);

        assert_eq!(arena.rotate(root), root);
        assert_eq!(arena.rotate_left(root), None);
    }

    #[test]
    fn replacement_comes_from_the_taller_side() {
        let mut arena = AvlArena::new();
        let root = chain(&mut arena, &[4, 2], false);
        let two = arena.left(root).unwrap();

        let three = Some(arena.alloc(3, Some(two)));
        arena.node_mut(two).right = three;
        let right = arena.alloc(5, Some(root));
        arena.node_mut(root).right = Some(right);
        arena.update_height(two);
        arena.update_height(root);

        assert_eq!(arena.replacement(root), three);
        assert_eq!(arena.replacement(right), None);

        arena.swap_values(root, three.unwrap());
        assert_eq!(*arena.value(root), 3);
        assert_eq!(*arena.value(three.unwrap()), 4);
    }

    #[test]
    fn released_slots_are_reused() {
        let mut arena = AvlArena::new();
        let first = arena.alloc(1, None);
        let _second = arena.alloc(2, None);

        assert_eq!(arena.release(first), 1);
        assert_eq!(arena.live(), 1);
        assert_eq!(arena.alloc(3, None), first);
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn copy_keeps_shape_and_heights() {
        let mut arena = AvlArena::new();
        let root = chain(&mut arena, &[1, 2, 3, 4], true);
        let root = arena.renew_up(Some(root)).unwrap();

        let mut copy = AvlArena::new();
        let copy_root = arena.copy_into(Some(root), &mut copy).unwrap();

        assert_eq!(in_order(&copy, copy_root), vec![1, 2, 3, 4]);
        assert_eq!(copy.node(copy_root).height, arena.node(root).height);
        assert_eq!(copy.live(), 4);
    }
}
