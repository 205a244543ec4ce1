//! Shared vectors with deferred concatenation.
//!
//! A [`Sequence`] is a reference-counted store of values. Whole sequences can
//! be embedded in O(1): the child is kept as a single
//! `Value::EmbeddedVector` slot and its extra length is tracked in the
//! store's `excess`. Sequential iteration descends into embedded children
//! on the fly; the first random access rewrites the shared store as one
//! flat array and releases the children.
//!
//! # Sharing
//!
//! Handles share a store, and the store shares its slot array with any
//! iterator or [`Sequence::flat`] snapshot taken from it. Mutating methods
//! go through `Rc::make_mut` at both levels, so a shared store or a
//! snapshotted array is copied (each slot an O(1) handle clone) before it
//! changes. Flattening in place is the one write through `&self`; it keeps
//! the logical contents and so is visible to every handle.
//!
//! # Teardown
//!
//! Repeated embedding builds chains as deep as the number of embeds.
//! Dropping a store unwinds nested stores with an explicit worklist so the
//! call stack stays flat regardless of depth.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::Value;

/// Nested stores released in one drop before it is worth a debug event.
const DEEP_RELEASE: usize = 1024;

/// Ordered, reference-shared collection of values.
#[derive(Clone, Default)]
pub struct Sequence {
    store: Rc<RefCell<SeqStore>>,
}

#[derive(Clone, Default)]
struct SeqStore {
    /// Plain elements and embedded children, in append order.
    items: Rc<Vec<Value>>,
    /// Sum of `len - 1` over the embedded children in `items`.
    excess: usize,
}

impl Drop for SeqStore {
    fn drop(&mut self) {
        // A snapshot still holds the array; it unwinds when that goes.
        let Some(items) = Rc::get_mut(&mut self.items) else {
            return;
        };
        let mut pending = std::mem::take(items);
        let mut released = 0usize;
        while let Some(value) = pending.pop() {
            if let Value::Vector(seq) | Value::EmbeddedVector(seq) = value {
                // Only the last owner unwinds; the nested store then drops
                // with nothing left in it.
                if let Ok(cell) = Rc::try_unwrap(seq.store) {
                    let mut store = cell.into_inner();
                    if let Some(items) = Rc::get_mut(&mut store.items) {
                        pending.append(items);
                        released += 1;
                    }
                }
            }
        }
        if released >= DEEP_RELEASE {
            tracing::debug!(released, "released nested sequence stores");
        }
    }
}

impl Sequence {
    pub fn new() -> Self {
        Sequence::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Sequence {
            store: Rc::new(RefCell::new(SeqStore {
                items: Rc::new(Vec::with_capacity(capacity)),
                excess: 0,
            })),
        }
    }

    /// Logical length, counting every element of embedded children.
    pub fn len(&self) -> usize {
        let store = self.store.borrow();
        store.items.len() + store.excess
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether no embedded child is pending.
    pub fn is_flat(&self) -> bool {
        self.store.borrow().excess == 0
    }

    /// Whether both handles share one store.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }

    /// Exclusive access to the store, copying it first if it is shared.
    fn store_mut(&mut self) -> &mut SeqStore {
        Rc::make_mut(&mut self.store).get_mut()
    }

    /// Exclusive access to the slot array.
    fn items_mut(&mut self) -> &mut Vec<Value> {
        Rc::make_mut(&mut self.store_mut().items)
    }

    /// The slot array as stored, embedded children included.
    fn slots(&self) -> Rc<Vec<Value>> {
        Rc::clone(&self.store.borrow().items)
    }

    /// Append one value.
    ///
    /// An `EmbeddedVector` is spliced in as its elements (see [`embed`]).
    ///
    /// [`embed`]: Sequence::embed
    pub fn push(&mut self, value: Value) {
        match value {
            Value::EmbeddedVector(child) => self.embed(child),
            value => self.items_mut().push(value),
        }
    }

    /// Append all of `child`'s elements in O(1).
    ///
    /// Empty children vanish and single-element children are stored as
    /// their element; anything longer is kept whole until random access.
    pub fn embed(&mut self, child: Sequence) {
        match child.len() {
            0 => {}
            1 => {
                if let Some(only) = child.iter().next() {
                    self.items_mut().push(only);
                }
            }
            len => {
                let store = self.store_mut();
                Rc::make_mut(&mut store.items).push(Value::EmbeddedVector(child));
                store.excess += len - 1;
            }
        }
    }

    /// Concatenate `other` onto the end.
    ///
    /// An empty receiver adopts `other`'s store outright. Otherwise the
    /// slots are moved over when `other` was the sole owner and copied
    /// when it was shared; pending embeds stay pending.
    pub fn append_vector(&mut self, other: Sequence) {
        if self.is_empty() {
            *self = other;
            return;
        }
        let (items, excess) = match Rc::try_unwrap(other.store) {
            Ok(cell) => {
                let mut store = cell.into_inner();
                (std::mem::take(&mut store.items), store.excess)
            }
            Err(shared) => {
                let store = shared.borrow();
                (Rc::clone(&store.items), store.excess)
            }
        };
        let store = self.store_mut();
        Rc::make_mut(&mut store.items).extend(Rc::unwrap_or_clone(items));
        store.excess += excess;
    }

    /// Rewrite the store as a flat array. No-op when already flat.
    pub fn flatten(&mut self) {
        let items = self.flat();
        if !self.is_flat() {
            *self.store_mut() = SeqStore { items, excess: 0 };
        }
    }

    /// All elements as one contiguous array.
    ///
    /// A pending store is flattened in place first: every handle sharing
    /// it sees `excess == 0` afterwards and the embedded children are
    /// released.
    pub fn flat(&self) -> Rc<Vec<Value>> {
        if self.is_flat() {
            return self.slots();
        }
        let items: Rc<Vec<Value>> = Rc::new(self.iter().collect());
        tracing::trace!(len = items.len(), "flattening embedded sequence");
        let flat = SeqStore {
            items: Rc::clone(&items),
            excess: 0,
        };
        // Drop the old store only once the borrow has ended.
        let old = self
            .store
            .try_borrow_mut()
            .map(|mut store| std::mem::replace(&mut *store, flat));
        drop(old);
        items
    }

    /// Element at `index`, flattening first if needed.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.flat().get(index).cloned()
    }

    /// In-order iteration that never flattens.
    pub fn iter(&self) -> Iter {
        Iter {
            current: Frame::new(self.slots()),
            stack: SmallVec::new(),
            remaining: self.len(),
        }
    }

    /// Lexicographic "less than" built on element `less`.
    pub(crate) fn less(&self, other: &Sequence) -> bool {
        let mut lhs = self.iter();
        let mut rhs = other.iter();
        loop {
            match (lhs.next(), rhs.next()) {
                (Some(a), Some(b)) => {
                    if a.less(&b) {
                        return true;
                    }
                    if b.less(&a) {
                        return false;
                    }
                }
                (None, Some(_)) => return true,
                _ => return false,
            }
        }
    }
}

/// Concatenate the elements of each vector element; other elements are
/// kept as they are. Only one level is removed.
pub fn flatten_vector(seq: &Sequence) -> Sequence {
    let mut out = Sequence::new();
    for value in seq {
        match value {
            Value::Vector(inner) => out.append_vector(inner),
            other => out.push(other),
        }
    }
    out
}

/// One open slot array and the position of its next slot.
#[derive(Clone)]
struct Frame {
    slots: Rc<Vec<Value>>,
    next: usize,
}

impl Frame {
    fn new(slots: Rc<Vec<Value>>) -> Self {
        Frame { slots, next: 0 }
    }
}

/// Depth-first iterator over a [`Sequence`].
///
/// Each open level holds its own snapshot of the slot array, so a flatten
/// or a write through another handle never disturbs a walk in progress.
/// Nesting is rarely more than a few levels, so the stack usually stays
/// inline. Elements are yielded as O(1) handle clones.
#[derive(Clone)]
pub struct Iter {
    current: Frame,
    stack: SmallVec<[Frame; 4]>,
    remaining: usize,
}

enum Step {
    Yield(Value),
    Descend(Rc<Vec<Value>>),
    Pop,
}

impl Iterator for Iter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        loop {
            let step = match self.current.slots.get(self.current.next) {
                Some(Value::EmbeddedVector(child)) => Step::Descend(child.slots()),
                Some(value) => Step::Yield(value.clone()),
                None => Step::Pop,
            };
            match step {
                Step::Yield(value) => {
                    self.current.next += 1;
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some(value);
                }
                Step::Descend(slots) => {
                    self.current.next += 1;
                    let parent = std::mem::replace(&mut self.current, Frame::new(slots));
                    self.stack.push(parent);
                }
                Step::Pop => self.current = self.stack.pop()?,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for &Sequence {
    type Item = Value;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut seq = Sequence::new();
        seq.extend(iter);
        seq
    }
}

impl Extend<Value> for Sequence {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
