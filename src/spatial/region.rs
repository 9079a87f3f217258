use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of row-major cell indices
///
/// Iteration always yields ascending indices, which is row-major order for
/// the grid the set was sized for. Out-of-range indices are ignored on
/// insert and report absent on lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellSet {
    bits: BitVec,
    capacity: usize,
}

impl CellSet {
    /// Create an empty set able to hold indices `0..capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Create a set holding every index in `0..capacity`
    pub fn full(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
            capacity,
        }
    }

    /// Build a set from a sequence of indices
    pub fn from_indices(capacity: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(capacity);
        for index in indices {
            set.insert(index);
        }
        set
    }

    /// Number of indices this set can address
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add an index, returning whether it was newly inserted
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= self.capacity || self.contains(index) {
            return false;
        }
        self.bits.set(index, true);
        true
    }

    /// Remove an index, returning whether it was present
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.contains(index) {
            return false;
        }
        self.bits.set(index, false);
        true
    }

    /// Test index membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Test if no indices are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count indices in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest index in the set
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Ascending iterator over member indices
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Test whether the two sets share any index
    pub fn intersects(&self, other: &Self) -> bool {
        self.iter().any(|index| other.contains(index))
    }

    /// Remove every index
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Extract all member indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellSet({} cells: {:?})", self.len(), self.to_vec())
    }
}
