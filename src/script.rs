//! Edit scripts: a sequence of [`Edit`]s bound to the two sequences it was
//! computed from and the equivalence used to compare them.

use std::fmt;
use std::ops::Range;

use crate::error::{DiffError, DiffResult, Side};
use crate::myers::{Change, Edit, Op};

/// An edit script transforming `front` into `back`.
///
/// Invariants, upheld by every operation in this crate:
/// * the front spans of Delete and Equal edits tile `front` in order, and the
///   back spans of Insert and Equal edits tile `back` in order;
/// * both spans of an Equal edit have the same length and are element-wise
///   equivalent under `eq`.
pub struct EditScript<'a, F, B, E> {
    pub(crate) front: &'a [F],
    pub(crate) back: &'a [B],
    pub(crate) edits: Vec<Edit>,
    pub(crate) eq: E,
}

impl<'a, F, B, E> EditScript<'a, F, B, E>
where
    E: Fn(&F, &B) -> bool,
{
    /// Assembles a script from caller-supplied edits, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: a span outside its sequence, a gap or
    /// overlap between consecutive spans, uncovered trailing elements, or an
    /// Equal edit whose sides differ in length or content.
    pub fn new(front: &'a [F], back: &'a [B], edits: Vec<Edit>, eq: E) -> DiffResult<Self> {
        let mut front_pos = 0;
        let mut back_pos = 0;
        for (index, edit) in edits.iter().enumerate() {
            if let Some(span) = edit.front() {
                front_pos = check_span(Side::Front, index, span, front_pos, front.len())?;
            }
            if let Some(span) = edit.back() {
                back_pos = check_span(Side::Back, index, span, back_pos, back.len())?;
            }
            if let Edit::Equal { front: f, back: b } = edit {
                if f.len() != b.len() {
                    return Err(DiffError::UnevenEqual {
                        index,
                        front: f.len(),
                        back: b.len(),
                    });
                }
                let mismatch = (0..f.len()).find(|&t| !eq(&front[f.start + t], &back[b.start + t]));
                if let Some(offset) = mismatch {
                    return Err(DiffError::NotEquivalent { index, offset });
                }
            }
        }
        if front_pos != front.len() {
            return Err(DiffError::Incomplete {
                side: Side::Front,
                covered: front_pos,
                len: front.len(),
            });
        }
        if back_pos != back.len() {
            return Err(DiffError::Incomplete {
                side: Side::Back,
                covered: back_pos,
                len: back.len(),
            });
        }
        Ok(Self::from_parts(front, back, edits, eq))
    }
}

fn check_span(
    side: Side,
    index: usize,
    span: &Range<usize>,
    expected: usize,
    len: usize,
) -> DiffResult<usize> {
    if span.start > span.end || span.end > len {
        return Err(DiffError::InvalidSpan {
            side,
            index,
            start: span.start,
            end: span.end,
            len,
        });
    }
    if span.start != expected {
        return Err(DiffError::Gap {
            side,
            index,
            expected,
            found: span.start,
        });
    }
    Ok(span.end)
}

impl<'a, F, B, E> EditScript<'a, F, B, E> {
    pub(crate) fn from_parts(front: &'a [F], back: &'a [B], edits: Vec<Edit>, eq: E) -> Self {
        EditScript { front, back, edits, eq }
    }

    pub fn front(&self) -> &'a [F] {
        self.front
    }

    pub fn back(&self) -> &'a [B] {
        self.back
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn into_edits(self) -> Vec<Edit> {
        self.edits
    }

    pub fn equivalence(&self) -> &E {
        &self.eq
    }

    /// Number of edits (not elements).
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// True if the script contains no Insert or Delete.
    pub fn is_unchanged(&self) -> bool {
        self.edits.iter().all(|edit| edit.is_equal() || edit.is_empty())
    }

    /// Number of back elements inserted.
    pub fn insertions(&self) -> usize {
        self.count(Op::Insert)
    }

    /// Number of front elements deleted.
    pub fn deletions(&self) -> usize {
        self.count(Op::Delete)
    }

    fn count(&self, op: Op) -> usize {
        self.edits.iter().filter(|edit| edit.op() == op).map(Edit::len).sum()
    }

    /// The edits resolved against the input sequences.
    ///
    /// ```
    /// use patchwork::{diff, Change};
    ///
    /// let script = diff(&[1, 2, 3], &[1, 3]);
    /// let changes: Vec<_> = script.changes().collect();
    /// assert_eq!(changes, vec![
    ///     Change::Equal(&[1][..], &[1][..]),
    ///     Change::Delete(&[2][..]),
    ///     Change::Equal(&[3][..], &[3][..]),
    /// ]);
    /// ```
    pub fn changes(&self) -> impl Iterator<Item = Change<'a, F, B>> + '_ {
        let (front, back) = (self.front, self.back);
        self.edits.iter().map(move |edit| match edit {
            Edit::Insert { back: b } => Change::Insert(&back[b.clone()]),
            Edit::Delete { front: f } => Change::Delete(&front[f.clone()]),
            Edit::Equal { front: f, back: b } => Change::Equal(&front[f.clone()], &back[b.clone()]),
        })
    }

    /// The front elements the script consumes, in order.
    pub fn front_elements(&self) -> impl Iterator<Item = &'a F> + '_ {
        let front = self.front;
        self.edits
            .iter()
            .filter_map(Edit::front)
            .flat_map(move |span| front[span.clone()].iter())
    }

    /// The back elements the script produces, in order.
    pub fn back_elements(&self) -> impl Iterator<Item = &'a B> + '_ {
        let back = self.back;
        self.edits
            .iter()
            .filter_map(Edit::back)
            .flat_map(move |span| back[span.clone()].iter())
    }

    /// Rebuilds the front sequence from the script.
    pub fn reconstruct_front(&self) -> Vec<F>
    where
        F: Clone,
    {
        self.front_elements().cloned().collect()
    }

    /// Rebuilds the back sequence from the script.
    pub fn reconstruct_back(&self) -> Vec<B>
    where
        B: Clone,
    {
        self.back_elements().cloned().collect()
    }

    pub fn levenshtein(&self) -> usize {
        levenshtein(&self.edits)
    }

    pub fn x_index(&self, loc: usize) -> usize {
        x_index(&self.edits, loc)
    }
}

impl<F, B, E: Clone> Clone for EditScript<'_, F, B, E> {
    fn clone(&self) -> Self {
        EditScript {
            front: self.front,
            back: self.back,
            edits: self.edits.clone(),
            eq: self.eq.clone(),
        }
    }
}

impl<F, B, E> fmt::Debug for EditScript<'_, F, B, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditScript")
            .field("front_len", &self.front.len())
            .field("back_len", &self.back.len())
            .field("edits", &self.edits)
            .finish_non_exhaustive()
    }
}

/// Element-level Levenshtein distance of a script: each run of changes between
/// equalities costs the larger of its inserted and deleted counts.
///
/// ```
/// use patchwork::{levenshtein, Edit};
///
/// // "abc" -> "1234" then "xyz" unchanged
/// let edits = [Edit::delete(0..3), Edit::insert(0..4), Edit::equal(3..6, 4..7)];
/// assert_eq!(levenshtein(&edits), 4);
/// ```
pub fn levenshtein(edits: &[Edit]) -> usize {
    let mut distance = 0;
    let mut inserted = 0;
    let mut deleted = 0;
    for edit in edits {
        match edit {
            Edit::Insert { back } => inserted += back.len(),
            Edit::Delete { front } => deleted += front.len(),
            Edit::Equal { .. } => {
                distance += inserted.max(deleted);
                inserted = 0;
                deleted = 0;
            }
        }
    }
    distance + inserted.max(deleted)
}

/// Maps a position in the front sequence to the equivalent position in the
/// back sequence. A position inside a deleted run maps to the start of that
/// deletion in the back sequence.
pub fn x_index(edits: &[Edit], loc: usize) -> usize {
    let mut front_pos = 0;
    let mut back_pos = 0;
    let mut last_front = 0;
    let mut last_back = 0;
    let mut landed = None;
    for edit in edits {
        if let Some(span) = edit.front() {
            front_pos += span.len();
        }
        if let Some(span) = edit.back() {
            back_pos += span.len();
        }
        if front_pos > loc {
            landed = Some(edit.op());
            break;
        }
        last_front = front_pos;
        last_back = back_pos;
    }
    if landed == Some(Op::Delete) {
        return last_back;
    }
    last_back + (loc - last_front)
}
