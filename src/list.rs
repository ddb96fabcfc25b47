extern crate alloc;

use alloc::fmt;
use alloc::vec::Vec;
use core::num::NonZeroUsize;

/// Stable handle to a node inside a [`List`].
///
/// A `NodeId` is the arena index of the node. It stays valid until the node
/// is removed from the list that issued it; after that the slot may be reused
/// for a different value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node in the doubly linked list.
///
/// Contains a value and the arena indices of the previous and next nodes.
/// Free slots keep `val == None` and are chained through `next`.
struct Entry<T> {
    val: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A doubly linked list with fixed capacity, backed by an index arena.
///
/// Nodes live in a `Vec` and refer to each other by index, so handles stay
/// valid across insertions and removals of other nodes. The front of the list
/// holds the most recently added (or moved) node; the back holds the oldest.
///
/// # Examples
///
/// ```ignore
/// use twoq::list::List;
/// use core::num::NonZeroUsize;
///
/// let mut list = List::new(NonZeroUsize::new(3).unwrap());
///
/// let a = list.add(10).unwrap();
/// let _b = list.add(20).unwrap();
///
/// list.move_to_front(a);
/// assert_eq!(list.remove_last(), Some(20));
/// ```
pub struct List<T> {
    /// Maximum number of items the list can hold.
    cap: NonZeroUsize,
    /// Current number of items in the list.
    len: usize,
    /// Arena of nodes, both live and free.
    nodes: Vec<Entry<T>>,
    /// Head of the free-slot chain.
    free: Option<usize>,
    /// Index of the front (most recent) node.
    head: Option<usize>,
    /// Index of the back (oldest) node.
    tail: Option<usize>,
}

impl<T> List<T> {
    /// Creates a new List that holds at most `cap` items.
    pub fn new(cap: NonZeroUsize) -> List<T> {
        List {
            cap,
            len: 0,
            nodes: Vec::with_capacity(cap.get()),
            free: None,
            head: None,
            tail: None,
        }
    }

    /// Returns the maximum number of items the list can hold.
    #[cfg(test)]
    pub fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    /// Returns the current number of items in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the list is at (or above) capacity.
    pub fn is_full(&self) -> bool {
        self.len >= self.cap.get()
    }

    /// Returns true if the list holds more items than its capacity allows.
    pub fn is_over_capacity(&self) -> bool {
        self.len > self.cap.get()
    }

    fn is_live(&self, idx: usize) -> bool {
        self.nodes.get(idx).is_some_and(|node| node.val.is_some())
    }

    /// Takes a slot from the free chain or grows the arena.
    fn alloc(&mut self, v: T) -> usize {
        match self.free {
            Some(idx) => {
                let node = &mut self.nodes[idx];
                self.free = node.next;
                node.val = Some(v);
                node.prev = None;
                node.next = None;
                idx
            }
            None => {
                self.nodes.push(Entry {
                    val: Some(v),
                    prev: None,
                    next: None,
                });
                self.nodes.len() - 1
            }
        }
    }

    /// Returns a slot to the free chain and hands back its value.
    fn release(&mut self, idx: usize) -> Option<T> {
        let node = &mut self.nodes[idx];
        let val = node.val.take();
        node.prev = None;
        node.next = self.free;
        self.free = Some(idx);
        val
    }

    /// Unlinks a live node without releasing its slot.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        let node = &mut self.nodes[idx];
        node.prev = None;
        node.next = None;
    }

    /// Links a detached node at the front of the list.
    fn attach(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[idx];
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.nodes[h].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns the handle of the new node, or `None` if the list is full.
    ///
    /// ```ignore
    /// let mut list = List::new(NonZeroUsize::new(2).unwrap());
    /// list.add(10).unwrap();
    /// list.add(20).unwrap();
    /// assert!(list.add(30).is_none());
    /// ```
    #[cfg(test)]
    pub fn add(&mut self, v: T) -> Option<NodeId> {
        if self.is_full() {
            return None;
        }
        Some(self.add_unchecked(v))
    }

    /// Adds a value to the front of the list, bypassing the capacity check.
    ///
    /// The list may temporarily hold `cap + 1` items; the caller is expected
    /// to restore the bound (usually with [`List::remove_last`]) right away.
    pub fn add_unchecked(&mut self, v: T) -> NodeId {
        let idx = self.alloc(v);
        self.attach(idx);
        self.len += 1;
        NodeId(idx)
    }

    /// Removes the node behind `id` and returns its value.
    ///
    /// Returns `None` if `id` does not refer to a live node of this list.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_live(id.0) {
            return None;
        }
        self.detach(id.0);
        self.len -= 1;
        self.release(id.0)
    }

    /// Removes the last (least recently added) item from the list.
    pub fn remove_last(&mut self) -> Option<T> {
        let idx = self.tail?;
        self.detach(idx);
        self.len -= 1;
        self.release(idx)
    }

    /// Moves a node to the front of the list.
    ///
    /// Returns `false` if `id` does not refer to a live node.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if !self.is_live(id.0) {
            return false;
        }
        if self.head != Some(id.0) {
            self.detach(id.0);
            self.attach(id.0);
        }
        true
    }

    /// Returns a reference to the value behind `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|node| node.val.as_ref())
    }

    /// Returns a mutable reference to the value behind `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).and_then(|node| node.val.as_mut())
    }

    /// Returns the value at the back (oldest end) of the list.
    #[cfg(test)]
    pub fn last(&self) -> Option<&T> {
        self.tail.and_then(|idx| self.nodes[idx].val.as_ref())
    }

    /// Iterates from the front (most recent) to the back (oldest).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Removes all items from the list.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len)
            .field("cap", &self.cap)
            .finish()
    }
}

/// Front-to-back iterator over a [`List`], yielding node handles and values.
pub struct Iter<'a, T> {
    list: &'a List<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = &self.list.nodes[idx];
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.val.as_ref().map(|v| (NodeId(idx), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    fn values<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().map(|(_, v)| v.clone()).collect()
    }

    #[test]
    fn test_construct_and_cap() {
        let list = List::<u32>::new(NonZeroUsize::new(5).unwrap());
        assert_eq!(list.cap().get(), 5);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(!list.is_full());
    }

    #[test]
    fn test_add_items() {
        let mut list = List::new(NonZeroUsize::new(3).unwrap());
        let a = list.add(1).unwrap();
        let b = list.add(2).unwrap();
        let c = list.add(3).unwrap();
        assert!(list.add(4).is_none());
        assert_eq!(list.len(), 3);
        assert!(list.is_full());
        assert_eq!(list.get(a), Some(&1));
        assert_eq!(list.get(b), Some(&2));
        assert_eq!(list.get(c), Some(&3));
        assert_eq!(values(&list), vec![3, 2, 1]);
    }

    #[test]
    fn test_remove_last_is_oldest() {
        let mut list = List::new(NonZeroUsize::new(3).unwrap());
        list.add(1);
        list.add(2);
        list.add(3);
        assert_eq!(list.remove_last(), Some(1));
        assert_eq!(list.remove_last(), Some(2));
        assert_eq!(list.remove_last(), Some(3));
        assert_eq!(list.remove_last(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_middle_and_stale_handle() {
        let mut list = List::new(NonZeroUsize::new(3).unwrap());
        list.add('a');
        let b = list.add('b').unwrap();
        list.add('c');

        assert_eq!(list.remove(b), Some('b'));
        assert_eq!(list.len(), 2);
        assert_eq!(values(&list), vec!['c', 'a']);

        // The handle is dead now.
        assert_eq!(list.remove(b), None);
        assert_eq!(list.get(b), None);
        assert!(!list.move_to_front(b));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::new(NonZeroUsize::new(3).unwrap());
        let a = list.add(1).unwrap();
        list.add(2);
        list.add(3);

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec![1, 3, 2]);
        assert_eq!(list.remove_last(), Some(2));

        // Already at the front.
        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec![1, 3]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_slot_reuse_keeps_links_consistent() {
        let mut list = List::new(NonZeroUsize::new(2).unwrap());
        let a = list.add(1).unwrap();
        list.add(2);
        list.remove(a);
        let c = list.add(3).unwrap();
        // The freed slot is recycled.
        assert_eq!(c, a);
        assert_eq!(values(&list), vec![3, 2]);
        assert_eq!(list.remove_last(), Some(2));
        assert_eq!(list.remove_last(), Some(3));
    }

    #[test]
    fn test_add_unchecked_exceeds_capacity() {
        let mut list = List::new(NonZeroUsize::new(1).unwrap());
        list.add_unchecked(1);
        list.add_unchecked(2);
        assert_eq!(list.len(), 2);
        assert!(list.is_over_capacity());
        assert_eq!(list.remove_last(), Some(1));
        assert!(!list.is_over_capacity());
    }

    #[test]
    fn test_get_mut_and_last() {
        let mut list = List::new(NonZeroUsize::new(2).unwrap());
        let a = list.add(String::from("one")).unwrap();
        list.add(String::from("two"));
        list.get_mut(a).unwrap().push_str("_modified");
        assert_eq!(list.last().map(String::as_str), Some("one_modified"));
    }

    #[test]
    fn test_clear() {
        let mut list = List::new(NonZeroUsize::new(3).unwrap());
        let a = list.add(1).unwrap();
        list.add(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.get(a), None);
        assert_eq!(list.iter().count(), 0);
        list.add(7);
        assert_eq!(values(&list), vec![7]);
    }
}
