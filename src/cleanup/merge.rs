use std::mem;
use std::ops::Range;

use tracing::trace;

use crate::myers::affix::{prefix_by, suffix_by};
use crate::myers::Edit;
use crate::script::EditScript;

impl<F, B, E> EditScript<'_, F, B, E>
where
    E: Fn(&F, &B) -> bool,
{
    /// Reorders and merges like edit sections, factoring out commonalities.
    ///
    /// Empty edits are dropped, every run of changes between two equalities
    /// becomes at most one Delete followed by one Insert, and a lone edit
    /// sandwiched by equalities is slid sideways when that lets it absorb one
    /// of them. Repeats until nothing moves; the result is a fixed point.
    pub fn cleanup_merge(&mut self) {
        let mut rounds = 0;
        loop {
            self.merge_runs();
            if !self.shift_single_edits() {
                break;
            }
            rounds += 1;
        }
        if rounds > 0 {
            trace!(rounds, edits = self.edits.len(), "shifted single edits across equalities");
        }
    }

    fn merge_runs(&mut self) {
        let (front_seq, back_seq, eq) = (self.front, self.back, &self.eq);
        let same = |i: usize, j: usize| eq(&front_seq[i], &back_seq[j]);

        let mut out = Vec::with_capacity(self.edits.len());
        let mut run = Run::default();
        for edit in mem::take(&mut self.edits) {
            if edit.is_empty() {
                continue;
            }
            match &edit {
                Edit::Insert { back } => run.insert = Some(extend(run.insert.take(), back)),
                Edit::Delete { front } => run.delete = Some(extend(run.delete.take(), front)),
                Edit::Equal { front, back } => {
                    let equal = (front.clone(), back.clone());
                    mem::take(&mut run).flush(&mut out, Some(equal), &same);
                    continue;
                }
            }
            run.count += 1;
            run.single = Some(edit);
        }
        run.flush(&mut out, None, &same);
        self.edits = out;
    }

    /// One left-to-right sweep of single-edit shifts. Returns whether anything moved.
    fn shift_single_edits(&mut self) -> bool {
        let (front_seq, back_seq, eq) = (self.front, self.back, &self.eq);
        let same = |i: usize, j: usize| eq(&front_seq[i], &back_seq[j]);
        let edits = &mut self.edits;

        let mut changed = false;
        let mut i = 1;
        while i + 1 < edits.len() {
            let shifted = match (&edits[i - 1], &edits[i + 1]) {
                (
                    Edit::Equal {
                        front: prev_front,
                        back: prev_back,
                    },
                    Edit::Equal {
                        front: next_front,
                        back: next_back,
                    },
                ) => shift_across(
                    (prev_front, prev_back),
                    &edits[i],
                    (next_front, next_back),
                    &same,
                ),
                _ => None,
            };
            if let Some(replacement) = shifted {
                edits.splice(i - 1..=i + 1, replacement);
                changed = true;
            }
            i += 1;
        }
        changed
    }
}

/// Changes collected since the last equality.
#[derive(Default)]
struct Run {
    delete: Option<Range<usize>>,
    insert: Option<Range<usize>>,
    count: usize,
    /// The most recent change; the whole run when `count == 1`.
    single: Option<Edit>,
}

impl Run {
    /// Emits the run followed by the equality that closed it, if any.
    fn flush(
        self,
        out: &mut Vec<Edit>,
        mut equal: Option<(Range<usize>, Range<usize>)>,
        same: &impl Fn(usize, usize) -> bool,
    ) {
        match self.count {
            0 => {}
            1 => out.extend(self.single),
            _ => {
                let (mut delete, mut insert) = (self.delete, self.insert);
                if let (Some(del), Some(ins)) = (&mut delete, &mut insert) {
                    let prefix = prefix_by(del.len(), ins.len(), |a, b| {
                        same(del.start + a, ins.start + b)
                    });
                    if prefix > 0 {
                        push_equal(
                            out,
                            del.start..del.start + prefix,
                            ins.start..ins.start + prefix,
                        );
                        del.start += prefix;
                        ins.start += prefix;
                    }

                    let suffix = suffix_by(del.len(), ins.len(), |a, b| {
                        same(del.start + a, ins.start + b)
                    });
                    if suffix > 0 {
                        del.end -= suffix;
                        ins.end -= suffix;
                        equal = Some(match equal {
                            Some((front, back)) => {
                                (front.start - suffix..front.end, back.start - suffix..back.end)
                            }
                            None => (del.end..del.end + suffix, ins.end..ins.end + suffix),
                        });
                    }
                }
                out.extend(delete.filter(|r| !r.is_empty()).map(Edit::delete));
                out.extend(insert.filter(|r| !r.is_empty()).map(Edit::insert));
            }
        }
        if let Some((front, back)) = equal {
            push_equal(out, front, back);
        }
    }
}

/// Appends an equality, widening the previous one when they touch.
fn push_equal(out: &mut Vec<Edit>, front: Range<usize>, back: Range<usize>) {
    match out.last_mut() {
        Some(Edit::Equal {
            front: prev_front,
            back: prev_back,
        }) => {
            debug_assert_eq!(prev_front.end, front.start);
            debug_assert_eq!(prev_back.end, back.start);
            prev_front.end = front.end;
            prev_back.end = back.end;
        }
        _ => out.push(Edit::equal(front, back)),
    }
}

fn extend(acc: Option<Range<usize>>, next: &Range<usize>) -> Range<usize> {
    match acc {
        None => next.clone(),
        Some(span) => {
            debug_assert_eq!(span.end, next.start, "edits of one kind must be contiguous");
            span.start..next.end
        }
    }
}

/// Slides the single edit `change`, sandwiched between two equalities, so
/// that it swallows one of them. Returns the two edits replacing all three.
fn shift_across(
    prev: (&Range<usize>, &Range<usize>),
    change: &Edit,
    next: (&Range<usize>, &Range<usize>),
    same: &impl Fn(usize, usize) -> bool,
) -> Option<[Edit; 2]> {
    let (prev_front, prev_back) = prev;
    let (next_front, next_back) = next;
    match change {
        Edit::Delete { front: cur } => {
            let left = prev_back.len();
            if cur.len() >= left
                && (0..left).all(|t| same(cur.end - left + t, prev_back.start + t))
            {
                return Some([
                    Edit::delete(prev_front.start..cur.end - left),
                    Edit::equal(cur.end - left..next_front.end, prev_back.start..next_back.end),
                ]);
            }
            let right = next_back.len();
            if cur.len() >= right && (0..right).all(|t| same(cur.start + t, next_back.start + t)) {
                return Some([
                    Edit::equal(
                        prev_front.start..cur.start + right,
                        prev_back.start..next_back.end,
                    ),
                    Edit::delete(cur.start + right..next_front.end),
                ]);
            }
            None
        }
        Edit::Insert { back: cur } => {
            let left = prev_front.len();
            if cur.len() >= left
                && (0..left).all(|t| same(prev_front.start + t, cur.end - left + t))
            {
                return Some([
                    Edit::insert(prev_back.start..cur.end - left),
                    Edit::equal(prev_front.start..next_front.end, cur.end - left..next_back.end),
                ]);
            }
            let right = next_front.len();
            if cur.len() >= right && (0..right).all(|t| same(next_front.start + t, cur.start + t)) {
                return Some([
                    Edit::equal(
                        prev_front.start..next_front.end,
                        prev_back.start..cur.start + right,
                    ),
                    Edit::insert(cur.start + right..next_back.end),
                ]);
            }
            None
        }
        Edit::Equal { .. } => None,
    }
}
