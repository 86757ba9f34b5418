//! Small-object, copy-on-write limb sequence.
//!
//! `Limbs` is inline while it holds at most [`INLINE_CAPACITY`] limbs and
//! lives in an `Rc<Vec<u32>>` otherwise. Cloning a heap sequence only bumps
//! the reference count; the first write through a handle that is not the
//! sole owner takes a private copy. None of this is observable through the
//! read/write API: a `Limbs` behaves like an owned `Vec<u32>`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use tracing::trace;

use crate::error::StorageError;
use crate::stats;

/// Number of limbs stored without a heap allocation.
pub const INLINE_CAPACITY: usize = 2;

/// Longest limb sequence a single allocation can address.
pub const MAX_LEN: usize = isize::MAX as usize / std::mem::size_of::<u32>();

#[derive(Clone)]
enum Repr {
    Inline {
        limbs: [u32; INLINE_CAPACITY],
        len: usize,
    },
    Shared(Rc<Vec<u32>>),
}

/// Little-endian sequence of `u32` limbs.
///
/// Invariant: the sequence is inline exactly when its length is at most
/// [`INLINE_CAPACITY`].
#[derive(Clone)]
pub struct Limbs(Repr);

fn inline_from(slice: &[u32]) -> Repr {
    debug_assert!(slice.len() <= INLINE_CAPACITY);
    let mut limbs = [0; INLINE_CAPACITY];
    limbs[..slice.len()].copy_from_slice(slice);
    Repr::Inline {
        limbs,
        len: slice.len(),
    }
}

/// Get a uniquely owned buffer, copying it if other handles still point at it.
fn unique(rc: &mut Rc<Vec<u32>>) -> &mut Vec<u32> {
    if Rc::strong_count(rc) > 1 {
        stats::record_detach();
        trace!(
            len = rc.len(),
            sharers = Rc::strong_count(rc),
            "detaching shared limb buffer"
        );
    }
    Rc::make_mut(rc)
}

impl Limbs {
    /// Create an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self(Repr::Inline {
            limbs: [0; INLINE_CAPACITY],
            len: 0,
        })
    }

    /// Create a sequence of `len` copies of `fill`.
    #[must_use]
    pub fn from_elem(len: usize, fill: u32) -> Self {
        if len <= INLINE_CAPACITY {
            let mut limbs = [0; INLINE_CAPACITY];
            limbs[..len].fill(fill);
            Self(Repr::Inline { limbs, len })
        } else {
            Self(Repr::Shared(Rc::new(vec![fill; len])))
        }
    }

    /// Copy a slice into a new sequence.
    #[must_use]
    pub fn from_slice(slice: &[u32]) -> Self {
        if slice.len() <= INLINE_CAPACITY {
            Self(inline_from(slice))
        } else {
            Self(Repr::Shared(Rc::new(slice.to_vec())))
        }
    }

    /// Take ownership of a vector. Short vectors are moved inline.
    #[must_use]
    pub fn from_vec(vec: Vec<u32>) -> Self {
        if vec.len() <= INLINE_CAPACITY {
            Self(inline_from(&vec))
        } else {
            Self(Repr::Shared(Rc::new(vec)))
        }
    }

    /// Number of limbs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.0 {
            Repr::Inline { len, .. } => *len,
            Repr::Shared(rc) => rc.len(),
        }
    }

    /// Whether the sequence holds no limbs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the limbs. Never allocates.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        match &self.0 {
            Repr::Inline { limbs, len } => &limbs[..*len],
            Repr::Shared(rc) => rc.as_slice(),
        }
    }

    /// Read the limb at `index`.
    pub fn get(&self, index: usize) -> Result<u32, StorageError> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(StorageError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    /// Read the most significant limb.
    pub fn back(&self) -> Result<u32, StorageError> {
        self.as_slice()
            .last()
            .copied()
            .ok_or(StorageError::IndexOutOfBounds { index: 0, len: 0 })
    }

    /// Whether the limbs are stored inline.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self.0, Repr::Inline { .. })
    }

    /// Number of handles referencing this sequence's buffer (1 when inline).
    #[must_use]
    pub fn share_count(&self) -> usize {
        match &self.0 {
            Repr::Inline { .. } => 1,
            Repr::Shared(rc) => Rc::strong_count(rc),
        }
    }

    /// Whether both handles reference the same heap buffer.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Shared(a), Repr::Shared(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Mutable access to the limb at `index`, detaching a shared buffer first.
    ///
    /// An out-of-range index fails before any copy is made.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut u32, StorageError> {
        let len = self.len();
        if index >= len {
            return Err(StorageError::IndexOutOfBounds { index, len });
        }
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Mutable access to all limbs, detaching a shared buffer first.
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        match &mut self.0 {
            Repr::Inline { limbs, len } => &mut limbs[..*len],
            Repr::Shared(rc) => unique(rc).as_mut_slice(),
        }
    }

    /// Append a most significant limb.
    pub fn push(&mut self, limb: u32) {
        if let Repr::Inline { limbs, len } = &mut self.0 {
            if *len < INLINE_CAPACITY {
                limbs[*len] = limb;
                *len += 1;
                return;
            }
        }
        self.with_vec(|vec| vec.push(limb));
    }

    /// Remove and return the most significant limb.
    pub fn pop(&mut self) -> Option<u32> {
        if let Repr::Inline { limbs, len } = &mut self.0 {
            if *len == 0 {
                return None;
            }
            *len -= 1;
            return Some(std::mem::take(&mut limbs[*len]));
        }
        self.with_vec(Vec::pop)
    }

    /// Resize to `new_len`, filling new high limbs with `fill`.
    pub fn resize(&mut self, new_len: usize, fill: u32) {
        if new_len <= INLINE_CAPACITY {
            let mut limbs = [0; INLINE_CAPACITY];
            let keep = self.len().min(new_len);
            limbs[..keep].copy_from_slice(&self.as_slice()[..keep]);
            limbs[keep..new_len].fill(fill);
            self.replace_inline(limbs, new_len);
            return;
        }
        self.with_vec(|vec| vec.resize(new_len, fill));
    }

    /// Shorten to `new_len` limbs; no-op if already that short.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len < self.len() {
            self.resize(new_len, 0);
        }
    }

    /// Prepend `count` zero limbs at the least significant end.
    pub fn insert_low(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let new_len = self.len() + count;
        if new_len <= INLINE_CAPACITY {
            let mut limbs = [0; INLINE_CAPACITY];
            limbs[count..new_len].copy_from_slice(self.as_slice());
            self.replace_inline(limbs, new_len);
            return;
        }
        self.with_vec(|vec| {
            vec.splice(0..0, std::iter::repeat(0).take(count));
        });
    }

    /// Like [`insert_low`](Self::insert_low), but reports a length that
    /// cannot be allocated instead of aborting. The sequence is unchanged on
    /// error.
    pub fn try_insert_low(&mut self, count: usize) -> Result<(), StorageError> {
        if count == 0 {
            return Ok(());
        }
        let len = self.len();
        let overflow = StorageError::CapacityOverflow {
            len,
            additional: count,
        };
        let new_len = len
            .checked_add(count)
            .filter(|&n| n <= MAX_LEN)
            .ok_or(overflow)?;
        if new_len <= INLINE_CAPACITY {
            self.insert_low(count);
            return Ok(());
        }
        let mut heap = Vec::new();
        heap.try_reserve_exact(new_len).map_err(|_| overflow)?;
        heap.resize(count, 0);
        heap.extend_from_slice(self.as_slice());
        if self.is_inline() {
            stats::record_promotion();
            trace!(len = new_len, "promoting inline limbs to heap");
        }
        self.0 = Repr::Shared(Rc::new(heap));
        Ok(())
    }

    /// Remove the `count` least significant limbs (all of them if `count` is larger).
    pub fn erase_low(&mut self, count: usize) {
        let len = self.len();
        let count = count.min(len);
        if count == 0 {
            return;
        }
        if len - count <= INLINE_CAPACITY {
            let mut limbs = [0; INLINE_CAPACITY];
            limbs[..len - count].copy_from_slice(&self.as_slice()[count..]);
            self.replace_inline(limbs, len - count);
            return;
        }
        self.with_vec(|vec| {
            vec.drain(..count);
        });
    }

    /// Reverse the limb order.
    pub fn reverse(&mut self) {
        self.as_mut_slice().reverse();
    }

    /// Drop most significant zero limbs, keeping at least one limb.
    pub fn trim_high_zeros(&mut self) {
        let len = self.len();
        let significant = self
            .as_slice()
            .iter()
            .rposition(|&limb| limb != 0)
            .map_or(1, |i| i + 1);
        self.truncate(significant.min(len));
    }

    fn replace_inline(&mut self, limbs: [u32; INLINE_CAPACITY], len: usize) {
        if let Repr::Shared(rc) = &self.0 {
            stats::record_demotion();
            trace!(from = rc.len(), to = len, "demoting heap limbs to inline");
        }
        self.0 = Repr::Inline { limbs, len };
    }

    /// Run `f` on an owned heap vector holding the limbs, then settle the
    /// representation: promote if the result no longer fits inline, demote if
    /// it does.
    fn with_vec<R>(&mut self, f: impl FnOnce(&mut Vec<u32>) -> R) -> R {
        let (result, next) = match &mut self.0 {
            Repr::Inline { limbs, len } => {
                let mut heap = Vec::with_capacity(INLINE_CAPACITY * 2);
                heap.extend_from_slice(&limbs[..*len]);
                let result = f(&mut heap);
                if heap.len() <= INLINE_CAPACITY {
                    (result, inline_from(&heap))
                } else {
                    stats::record_promotion();
                    trace!(len = heap.len(), "promoting inline limbs to heap");
                    (result, Repr::Shared(Rc::new(heap)))
                }
            }
            Repr::Shared(rc) => {
                let heap = unique(rc);
                let result = f(&mut *heap);
                if heap.len() > INLINE_CAPACITY {
                    return result;
                }
                stats::record_demotion();
                trace!(len = heap.len(), "demoting heap limbs to inline");
                (result, inline_from(heap))
            }
        };
        self.0 = next;
        result
    }
}

impl Default for Limbs {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Limbs {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        self.as_slice()
    }
}

impl PartialEq for Limbs {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Limbs {}

impl Hash for Limbs {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for Limbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.is_inline() { "Inline" } else { "Shared" };
        f.debug_tuple(name).field(&self.as_slice()).finish()
    }
}

impl From<Vec<u32>> for Limbs {
    fn from(vec: Vec<u32>) -> Self {
        Self::from_vec(vec)
    }
}

impl From<&[u32]> for Limbs {
    fn from(slice: &[u32]) -> Self {
        Self::from_slice(slice)
    }
}

impl FromIterator<u32> for Limbs {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
