//! Binary heap stored as a linked complete tree.
//!
//! Slots are numbered 1-based in level order, like an array heap, but there is
//! no array: the way down to slot `n` is read off the binary digits of `n`
//! below its leading one. A `0` digit means left and a `1` digit means right.

use std::mem;

use log::trace;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// Directions from the root to a slot. The last element is the first step.
type Path = Vec<Direction>;

fn path_to(mut slot: usize) -> Path {
    let mut path = Path::new();
    while slot >= 2 {
        path.push(if slot % 2 == 0 {
            Direction::Left
        } else {
            Direction::Right
        });
        slot /= 2;
    }
    path
}

#[derive(Debug)]
struct HeapNode<T> {
    value: T,
    left: Option<Box<HeapNode<T>>>,
    right: Option<Box<HeapNode<T>>>,
}

impl<T> HeapNode<T> {
    fn leaf(value: T) -> Self {
        HeapNode {
            value,
            left: None,
            right: None,
        }
    }

    fn slot(&mut self, direction: Direction) -> &mut Option<Box<HeapNode<T>>> {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Borrows the payload and one child at the same time.
    fn split(&mut self, direction: Direction) -> (&mut T, Option<&mut HeapNode<T>>) {
        let child = match direction {
            Direction::Left => self.left.as_deref_mut(),
            Direction::Right => self.right.as_deref_mut(),
        };
        (&mut self.value, child)
    }
}

fn default_less_priority<T: PartialOrd>(a: &T, b: &T) -> bool {
    a < b
}

/// Priority queue ordered by a `less_priority(a, b)` predicate.
///
/// `less_priority(a, b)` returns `true` when `a` ranks below `b`, meaning `b`
/// belongs above `a`. The element that ranks highest is the top. With the
/// default predicate, greater values rank higher (a max-heap).
pub struct Heap<T, F = fn(&T, &T) -> bool> {
    root: Option<Box<HeapNode<T>>>,
    size: usize,
    less_priority: F,
}

impl<T: PartialOrd> Heap<T> {
    pub fn new() -> Self {
        Self::with_priority(default_less_priority)
    }
}

impl<T: PartialOrd> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> Heap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn with_priority(less_priority: F) -> Self {
        Heap {
            root: None,
            size: 0,
            less_priority,
        }
    }

    pub fn get_size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the highest ranked element without removing it.
    pub fn get_top(&self) -> Result<&T> {
        self.root
            .as_deref()
            .map(|node| &node.value)
            .ok_or(Error::EmptyHeap)
    }

    /// Adds `value` at the next free slot and moves it up to its rank.
    pub fn insert(&mut self, value: T) {
        self.size += 1;
        let leaf = Box::new(HeapNode::leaf(value));

        let Some(root) = self.root.as_deref_mut() else {
            self.root = Some(leaf);
            return;
        };

        let mut path = path_to(self.size);
        trace!("heap insert at slot {} ({} steps)", self.size, path.len());
        Self::insert_leaf(root, path.clone(), leaf);
        Self::bubble_up(root, &mut path, &self.less_priority);
    }

    /// Removes and returns the highest ranked element.
    pub fn pop_top(&mut self) -> Result<T> {
        match self.size {
            0 => Err(Error::EmptyHeap),
            1 => {
                let root = self.root.take().ok_or(Error::EmptyHeap)?;
                self.size = 0;
                Ok(root.value)
            }
            size => {
                let Some(root) = self.root.as_deref_mut() else {
                    return Err(Error::EmptyHeap);
                };
                let last = Self::pop_leaf(root, path_to(size));
                self.size -= 1;
                let top = mem::replace(&mut root.value, last);
                Self::bubble_down(root, &self.less_priority);
                Ok(top)
            }
        }
    }

    /// Checks the ordering of every parent/child pair and that the occupied
    /// slots are exactly `1..=size`.
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.root.as_deref() else {
            return self.size == 0;
        };

        let mut count = 0;
        let mut pending = vec![(root, 1usize)];
        while let Some((node, slot)) = pending.pop() {
            count += 1;
            if slot > self.size {
                return false;
            }
            for (child, child_slot) in [(&node.left, 2 * slot), (&node.right, 2 * slot + 1)] {
                if let Some(child) = child.as_deref() {
                    if (self.less_priority)(&node.value, &child.value) {
                        return false;
                    }
                    pending.push((child, child_slot));
                }
            }
        }
        count == self.size
    }

    fn insert_leaf(root: &mut HeapNode<T>, mut path: Path, leaf: Box<HeapNode<T>>) {
        let mut node = root;
        while let Some(direction) = path.pop() {
            let slot = node.slot(direction);
            if path.is_empty() {
                debug_assert!(slot.is_none(), "insert target slot already occupied");
                *slot = Some(leaf);
                return;
            }
            node = match slot.as_deref_mut() {
                Some(child) => child,
                None => unreachable!("complete tree is missing an inner slot"),
            };
        }
        unreachable!("insert path for a non-root slot is never empty");
    }

    // The comparison runs while the recursion unwinds, so the new leaf climbs
    // one level per frame until its parent outranks it.
    fn bubble_up(node: &mut HeapNode<T>, path: &mut Path, less_priority: &F) {
        let Some(direction) = path.pop() else {
            return;
        };
        let (value, child) = node.split(direction);
        let Some(child) = child else {
            unreachable!("bubble-up path leads outside the tree");
        };

        Self::bubble_up(child, path, less_priority);

        if less_priority(&*value, &child.value) {
            mem::swap(value, &mut child.value);
        }
    }

    fn pop_leaf(root: &mut HeapNode<T>, mut path: Path) -> T {
        let mut node = root;
        while let Some(direction) = path.pop() {
            let slot = node.slot(direction);
            if path.is_empty() {
                let Some(leaf) = slot.take() else {
                    unreachable!("last slot is empty");
                };
                debug_assert!(leaf.left.is_none() && leaf.right.is_none());
                return leaf.value;
            }
            node = match slot.as_deref_mut() {
                Some(child) => child,
                None => unreachable!("complete tree is missing an inner slot"),
            };
        }
        unreachable!("path to the last slot of a heap larger than one is never empty");
    }

    fn bubble_down(node: &mut HeapNode<T>, less_priority: &F) {
        let HeapNode { value, left, right } = node;
        match (left.as_deref_mut(), right.as_deref_mut()) {
            (None, None) => {}
            (Some(left), None) => {
                if less_priority(&*value, &left.value) {
                    mem::swap(value, &mut left.value);
                }
            }
            (None, Some(_)) => unreachable!("complete tree has a right child without a left"),
            (Some(left), Some(right)) => {
                // equal children: the right one moves up
                let child = if less_priority(&right.value, &left.value) {
                    left
                } else {
                    right
                };
                if less_priority(&*value, &child.value) {
                    mem::swap(value, &mut child.value);
                    Self::bubble_down(child, less_priority);
                }
            }
        }
    }
}

impl<T, F> Extend<T> for Heap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: PartialOrd> FromIterator<T> for Heap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Heap::new();
        heap.extend(iter);
        heap
    }
}
