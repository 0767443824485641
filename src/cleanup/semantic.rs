use std::mem;
use std::ops::Range;

use tracing::debug;

use crate::myers::affix::overlap_by;
use crate::myers::{Edit, Op};
use crate::script::EditScript;

impl<F, B, E> EditScript<'_, F, B, E>
where
    E: Fn(&F, &B) -> bool,
{
    /// Reduces the number of edits by eliminating semantically trivial
    /// equalities.
    ///
    /// An equality no longer than the changes on both of its sides is folded
    /// into them. Afterwards, a deletion whose tail overlaps the head of the
    /// following insertion (or the other way round) by at least half of either
    /// has the overlap pulled out as an equality.
    pub fn cleanup_semantic(&mut self) {
        let before = self.edits.len();
        if self.eliminate_trivial_equalities() {
            self.cleanup_merge();
        }
        self.extract_overlaps();
        if self.edits.len() != before {
            debug!(before, after = self.edits.len(), "semantic cleanup rewrote script");
        }
    }

    fn eliminate_trivial_equalities(&mut self) -> bool {
        let mut changed = false;
        // Indices of candidate equalities, most recent last.
        let mut equalities: Vec<usize> = Vec::new();
        let mut last_equality: Option<usize> = None;
        let (mut inserted_before, mut deleted_before) = (0, 0);
        let (mut inserted_after, mut deleted_after) = (0, 0);

        let mut pointer = 0;
        while pointer < self.edits.len() {
            let edit = &self.edits[pointer];
            let (op, len) = (edit.op(), edit.len());
            match op {
                Op::Equal => {
                    equalities.push(pointer);
                    inserted_before = inserted_after;
                    deleted_before = deleted_after;
                    inserted_after = 0;
                    deleted_after = 0;
                    last_equality = Some(len);
                }
                Op::Insert | Op::Delete => {
                    if op == Op::Insert {
                        inserted_after += len;
                    } else {
                        deleted_after += len;
                    }
                    let trivial = last_equality.is_some_and(|eq_len| {
                        eq_len <= inserted_before.max(deleted_before)
                            && eq_len <= inserted_after.max(deleted_after)
                    });
                    if trivial {
                        if let Some(at) = equalities.pop() {
                            self.split_equality(at);
                        }
                        // The equality before it may have become trivial too.
                        equalities.pop();
                        pointer = equalities.last().map_or(0, |&at| at + 1);
                        inserted_before = 0;
                        deleted_before = 0;
                        inserted_after = 0;
                        deleted_after = 0;
                        last_equality = None;
                        changed = true;
                        continue;
                    }
                }
            }
            pointer += 1;
        }
        changed
    }

    fn extract_overlaps(&mut self) {
        let (front_seq, back_seq, eq) = (self.front, self.back, &self.eq);
        let same = |i: usize, j: usize| eq(&front_seq[i], &back_seq[j]);

        let mut out = Vec::with_capacity(self.edits.len());
        let mut edits = mem::take(&mut self.edits).into_iter().peekable();
        while let Some(edit) = edits.next() {
            let split = match (&edit, edits.peek()) {
                (Edit::Delete { front }, Some(Edit::Insert { back })) => {
                    split_overlap(front, back, &same)
                }
                _ => None,
            };
            match split {
                Some(parts) => {
                    out.extend(parts.into_iter().filter(|part| !part.is_empty()));
                    edits.next();
                }
                None => out.push(edit),
            }
        }
        self.edits = out;
    }
}

/// Splits a Delete/Insert pair around the longer of its two overlaps when
/// that overlap covers at least half of either edit.
fn split_overlap(
    deleted: &Range<usize>,
    inserted: &Range<usize>,
    same: &impl Fn(usize, usize) -> bool,
) -> Option<[Edit; 3]> {
    let (dl, il) = (deleted.len(), inserted.len());
    // Tail of the deletion against head of the insertion, and vice versa.
    let forward = overlap_by(dl, il, |a, b| same(deleted.start + a, inserted.start + b));
    let reverse = overlap_by(il, dl, |a, b| same(deleted.start + b, inserted.start + a));

    if forward >= reverse {
        if forward * 2 >= dl || forward * 2 >= il {
            return Some([
                Edit::delete(deleted.start..deleted.end - forward),
                Edit::equal(
                    deleted.end - forward..deleted.end,
                    inserted.start..inserted.start + forward,
                ),
                Edit::insert(inserted.start + forward..inserted.end),
            ]);
        }
    } else if reverse * 2 >= dl || reverse * 2 >= il {
        return Some([
            Edit::insert(inserted.start..inserted.end - reverse),
            Edit::equal(
                deleted.start..deleted.start + reverse,
                inserted.end - reverse..inserted.end,
            ),
            Edit::delete(deleted.start + reverse..deleted.end),
        ]);
    }
    None
}
