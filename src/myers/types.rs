use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of an edit, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Op {
    Insert,
    Delete,
    Equal,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self {
            Op::Insert => '+',
            Op::Delete => '-',
            Op::Equal => ' ',
        };
        write!(f, "{sign}")
    }
}

/// Each element in an edit script is one of
/// new elements of the back sequence (Insert),
/// elements removed from the front sequence (Delete),
/// a block present in both (Equal).
///
/// Edits address the two input sequences by index range, so they stay
/// cheap to split and widen while cleanup passes rewrite the script.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edit {
    Insert { back: Range<usize> },
    Delete { front: Range<usize> },
    Equal { front: Range<usize>, back: Range<usize> },
}

impl Edit {
    pub fn insert(back: Range<usize>) -> Self {
        Edit::Insert { back }
    }

    pub fn delete(front: Range<usize>) -> Self {
        Edit::Delete { front }
    }

    pub fn equal(front: Range<usize>, back: Range<usize>) -> Self {
        debug_assert_eq!(front.len(), back.len(), "equal spans must have the same length");
        Edit::Equal { front, back }
    }

    pub fn op(&self) -> Op {
        match self {
            Edit::Insert { .. } => Op::Insert,
            Edit::Delete { .. } => Op::Delete,
            Edit::Equal { .. } => Op::Equal,
        }
    }

    /// The span consumed from the front sequence, if any.
    pub fn front(&self) -> Option<&Range<usize>> {
        match self {
            Edit::Delete { front } | Edit::Equal { front, .. } => Some(front),
            Edit::Insert { .. } => None,
        }
    }

    /// The span consumed from the back sequence, if any.
    pub fn back(&self) -> Option<&Range<usize>> {
        match self {
            Edit::Insert { back } | Edit::Equal { back, .. } => Some(back),
            Edit::Delete { .. } => None,
        }
    }

    /// Number of elements carried by this edit.
    pub fn len(&self) -> usize {
        match self {
            Edit::Insert { back } => back.len(),
            Edit::Delete { front } | Edit::Equal { front, .. } => front.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Edit::Equal { .. })
    }

    pub fn is_change(&self) -> bool {
        !self.is_equal()
    }
}

/// An edit resolved against the sequences it was computed from.
#[derive(Debug, PartialEq, Eq)]
pub enum Change<'a, F, B> {
    Insert(&'a [B]),
    Delete(&'a [F]),
    Equal(&'a [F], &'a [B]),
}

impl<F, B> Clone for Change<'_, F, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F, B> Copy for Change<'_, F, B> {}

impl<'a, F, B> Change<'a, F, B> {
    pub fn op(&self) -> Op {
        match self {
            Change::Insert(_) => Op::Insert,
            Change::Delete(_) => Op::Delete,
            Change::Equal(..) => Op::Equal,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Change::Insert(back) => back.len(),
            Change::Delete(front) | Change::Equal(front, _) => front.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
