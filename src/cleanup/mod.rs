//! Post-processing passes that rewrite an edit script without changing the
//! sequences it reconstructs.
//!
//! * [`cleanup_merge`] canonicalises a script: adjacent edits of one kind are
//!   joined and common affixes of a replacement are factored into equalities.
//! * [`cleanup_semantic`] trades minimality for readability by dissolving
//!   equalities that are short next to the changes around them.
//! * [`cleanup_efficiency`] dissolves short equalities when doing so saves
//!   edits under a fixed per-edit cost.
//!
//! Each pass is also available as a method on [`EditScript`].

mod efficiency;
mod merge;
mod semantic;

use crate::myers::Edit;
use crate::script::EditScript;

pub fn cleanup_merge<F, B, E>(script: &mut EditScript<'_, F, B, E>)
where
    E: Fn(&F, &B) -> bool,
{
    script.cleanup_merge();
}

pub fn cleanup_semantic<F, B, E>(script: &mut EditScript<'_, F, B, E>)
where
    E: Fn(&F, &B) -> bool,
{
    script.cleanup_semantic();
}

pub fn cleanup_efficiency<F, B, E>(script: &mut EditScript<'_, F, B, E>, edit_cost: usize)
where
    E: Fn(&F, &B) -> bool,
{
    script.cleanup_efficiency(edit_cost);
}

impl<F, B, E> EditScript<'_, F, B, E> {
    /// Replaces the Equal at `at` with a Delete of its front span followed by
    /// an Insert of its back span.
    pub(crate) fn split_equality(&mut self, at: usize) {
        if let Some(Edit::Equal { front, back }) = self.edits.get(at).cloned() {
            self.edits[at] = Edit::delete(front);
            self.edits.insert(at + 1, Edit::insert(back));
        }
    }
}
