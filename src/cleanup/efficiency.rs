use tracing::debug;

use crate::myers::Op;
use crate::script::EditScript;

impl<F, B, E> EditScript<'_, F, B, E>
where
    E: Fn(&F, &B) -> bool,
{
    /// Reduces the number of edits by eliminating operationally trivial
    /// equalities, given that each extra edit costs `edit_cost` elements.
    ///
    /// An equality shorter than `edit_cost` is folded into the surrounding
    /// changes when it sits between an insertion and a deletion on both sides,
    /// or when it is shorter than half of `edit_cost` and three of those four
    /// kinds of change surround it.
    pub fn cleanup_efficiency(&mut self, edit_cost: usize) {
        let mut changed = false;
        let mut equalities: Vec<usize> = Vec::new();
        let mut last_equality: Option<usize> = None;
        // Whether there is an insertion/deletion before the last candidate
        // equality, and after it.
        let (mut pre_ins, mut pre_del) = (false, false);
        let (mut post_ins, mut post_del) = (false, false);

        let mut pointer = 0;
        while pointer < self.edits.len() {
            let edit = &self.edits[pointer];
            let (op, len) = (edit.op(), edit.len());
            if op == Op::Equal {
                if len < edit_cost && (post_ins || post_del) {
                    equalities.push(pointer);
                    pre_ins = post_ins;
                    pre_del = post_del;
                    last_equality = Some(len);
                } else {
                    equalities.clear();
                    last_equality = None;
                }
                post_ins = false;
                post_del = false;
            } else {
                if op == Op::Delete {
                    post_del = true;
                } else {
                    post_ins = true;
                }

                let sides = [pre_ins, pre_del, post_ins, post_del]
                    .into_iter()
                    .filter(|&side| side)
                    .count();
                let wasteful = last_equality
                    .is_some_and(|eq_len| sides == 4 || (eq_len * 2 < edit_cost && sides == 3));
                if wasteful {
                    if let Some(at) = equalities.pop() {
                        self.split_equality(at);
                    }
                    last_equality = None;
                    changed = true;
                    if pre_ins && pre_del {
                        // No changes made which could affect previous entry, keep going.
                        post_ins = true;
                        post_del = true;
                        equalities.clear();
                    } else {
                        equalities.pop();
                        pointer = equalities.last().map_or(0, |&at| at + 1);
                        post_ins = false;
                        post_del = false;
                        continue;
                    }
                }
            }
            pointer += 1;
        }

        if changed {
            let before = self.edits.len();
            self.cleanup_merge();
            debug!(
                before,
                after = self.edits.len(),
                edit_cost,
                "efficiency cleanup rewrote script"
            );
        }
    }
}
