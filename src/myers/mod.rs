//! Myers' O(ND) difference algorithm, divide-and-conquer flavour.
//!
//! Work proceeds on pairs of index ranges. Each pair has its common prefix and
//! suffix stripped, then the middle is solved by the cheapest rule that
//! applies: trivial insert/delete, containment, single-element replacement,
//! half-match split (only under a deadline), and finally the middle-snake
//! bisection. Sub-problems are kept on an explicit stack so deep recursion
//! cannot overflow, and edits are emitted strictly left to right.

pub mod affix;
mod bisect;
mod half_match;
pub mod types;

pub use affix::{common_overlap, common_prefix, common_suffix};
pub use types::*;

use std::ops::Range;

use tracing::{trace, trace_span};

use crate::deadline::Deadline;
use crate::options::DiffOptions;
use crate::script::EditScript;
use half_match::half_match;

/// Equivalence used by [`diff`]: plain `PartialEq`.
pub type PartialEqFn<T> = fn(&T, &T) -> bool;

/// Computes the diff between two sequences of the same type with the default
/// options (one second budget).
///
/// # Examples
///
/// ```
/// use patchwork::myers::{diff, Edit};
///
/// let old = vec![1, 2, 3];
/// let new = vec![1, 3, 4];
/// let script = diff(&old, &new);
/// assert_eq!(script.edits(), &[
///     Edit::equal(0..1, 0..1),
///     Edit::delete(1..2),
///     Edit::equal(2..3, 1..2),
///     Edit::insert(2..3),
/// ]);
/// ```
pub fn diff<'a, T: PartialEq>(
    front: &'a [T],
    back: &'a [T],
) -> EditScript<'a, T, T, PartialEqFn<T>> {
    DiffOptions::default().diff(front, back)
}

/// Computes the diff between `front` and `back` under the equivalence `eq`,
/// giving up on exactness once `deadline` expires.
///
/// The result is merged (see [`EditScript::cleanup_merge`]) and always
/// reconstructs both inputs, however early the deadline fires.
///
/// # Arguments
///
/// * `front` - The original sequence
/// * `back` - The new sequence
/// * `eq` - Called as `eq(front_element, back_element)`
/// * `deadline` - Checked once per edit-distance layer of every bisection
pub fn diff_by<'a, F, B, E, D>(
    front: &'a [F],
    back: &'a [B],
    eq: E,
    deadline: &D,
) -> EditScript<'a, F, B, E>
where
    E: Fn(&F, &B) -> bool,
    D: Deadline + ?Sized,
{
    let span = trace_span!("diff", front = front.len(), back = back.len());
    let _enter = span.enter();

    let edits = Driver::new(front, back, &eq, deadline).run(Task::Solve {
        front: 0..front.len(),
        back: 0..back.len(),
    });
    let mut script = EditScript::from_parts(front, back, edits, eq);
    script.cleanup_merge();
    script
}

/// Runs the middle-snake bisection directly on the whole of both sequences,
/// without stripping common affixes first. Falls back to a single
/// replacement if the deadline expires before the snake is found.
///
/// ```
/// use patchwork::{bisect, Edit, Expired};
///
/// let script = bisect(b"cat", b"map", |a, b| a == b, &Expired);
/// assert_eq!(script.edits(), &[Edit::delete(0..3), Edit::insert(0..3)]);
/// ```
pub fn bisect<'a, F, B, E, D>(
    front: &'a [F],
    back: &'a [B],
    eq: E,
    deadline: &D,
) -> EditScript<'a, F, B, E>
where
    E: Fn(&F, &B) -> bool,
    D: Deadline + ?Sized,
{
    let span = trace_span!("bisect", front = front.len(), back = back.len());
    let _enter = span.enter();

    let edits = Driver::new(front, back, &eq, deadline).run(Task::Bisect {
        front: 0..front.len(),
        back: 0..back.len(),
    });
    let mut script = EditScript::from_parts(front, back, edits, eq);
    script.cleanup_merge();
    script
}

enum Task {
    /// Strip common affixes, then solve the middle.
    Solve { front: Range<usize>, back: Range<usize> },
    /// Split around the middle snake without stripping affixes.
    Bisect { front: Range<usize>, back: Range<usize> },
    /// Append a finished edit to the output.
    Emit(Edit),
}

struct Driver<'d, F, B, E, D: ?Sized> {
    front: &'d [F],
    back: &'d [B],
    eq: &'d E,
    deadline: &'d D,
    out: Vec<Edit>,
    /// Pending work, popped last-in first-out. Right-hand work is pushed
    /// before left-hand work so the output stays in order.
    stack: Vec<Task>,
}

impl<'d, F, B, E, D> Driver<'d, F, B, E, D>
where
    E: Fn(&F, &B) -> bool,
    D: Deadline + ?Sized,
{
    fn new(front: &'d [F], back: &'d [B], eq: &'d E, deadline: &'d D) -> Self {
        Driver {
            front,
            back,
            eq,
            deadline,
            out: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn run(mut self, first: Task) -> Vec<Edit> {
        self.stack.push(first);
        while let Some(task) = self.stack.pop() {
            match task {
                Task::Solve { front, back } => self.solve(front, back),
                Task::Bisect { front, back } => self.bisect(front, back),
                Task::Emit(edit) => self.out.push(edit),
            }
        }
        self.out
    }

    fn same(&self, i: usize, j: usize) -> bool {
        (self.eq)(&self.front[i], &self.back[j])
    }

    fn solve(&mut self, front: Range<usize>, back: Range<usize>) {
        let (front_seq, back_seq) = (self.front, self.back);
        let f = &front_seq[front.clone()];
        let b = &back_seq[back.clone()];
        let prefix = common_prefix(f, b, self.eq);
        let suffix = common_suffix(&f[prefix..], &b[prefix..], self.eq);

        if prefix > 0 {
            self.out.push(Edit::equal(
                front.start..front.start + prefix,
                back.start..back.start + prefix,
            ));
        }
        let mid_front = front.start + prefix..front.end - suffix;
        let mid_back = back.start + prefix..back.end - suffix;
        if suffix > 0 {
            self.stack
                .push(Task::Emit(Edit::equal(mid_front.end..front.end, mid_back.end..back.end)));
        }
        self.compute(mid_front, mid_back);
    }

    /// Solves a pair with no common prefix or suffix.
    fn compute(&mut self, front: Range<usize>, back: Range<usize>) {
        if front.is_empty() || back.is_empty() {
            self.replace(front, back);
            return;
        }
        if self.contained(&front, &back) {
            trace!(front = front.len(), back = back.len(), "containment");
            return;
        }
        if front.len() == 1 || back.len() == 1 {
            // Not contained, so the lone element has no counterpart.
            self.replace(front, back);
            return;
        }
        if self.deadline.is_bounded() {
            let (front_seq, back_seq) = (self.front, self.back);
            let found = half_match(&front_seq[front.clone()], &back_seq[back.clone()], self.eq);
            if let Some(hm) = found {
                let hm = hm.offset(front.start, back.start);
                trace!(common = hm.common_front.len(), "half match");
                self.stack.push(Task::Solve {
                    front: hm.front_after,
                    back: hm.back_after,
                });
                self.stack.push(Task::Emit(Edit::equal(hm.common_front, hm.common_back)));
                self.stack.push(Task::Solve {
                    front: hm.front_before,
                    back: hm.back_before,
                });
                return;
            }
        }
        self.bisect(front, back);
    }

    /// Emits the shorter side as an equality inside the longer one, if it
    /// occurs there whole.
    fn contained(&mut self, front: &Range<usize>, back: &Range<usize>) -> bool {
        if front.len() > back.len() {
            let found = affix::find_by(front.len(), back.len(), 0, |h, p| {
                self.same(front.start + h, back.start + p)
            });
            let Some(at) = found else {
                return false;
            };
            let common = front.start + at..front.start + at + back.len();
            self.emit_nonempty(Edit::delete(front.start..common.start));
            self.out.push(Edit::equal(common.clone(), back.clone()));
            self.emit_nonempty(Edit::delete(common.end..front.end));
        } else {
            let found = affix::find_by(back.len(), front.len(), 0, |h, p| {
                self.same(front.start + p, back.start + h)
            });
            let Some(at) = found else {
                return false;
            };
            let common = back.start + at..back.start + at + front.len();
            self.emit_nonempty(Edit::insert(back.start..common.start));
            self.out.push(Edit::equal(front.clone(), common.clone()));
            self.emit_nonempty(Edit::insert(common.end..back.end));
        }
        true
    }

    fn bisect(&mut self, front: Range<usize>, back: Range<usize>) {
        let (front_seq, back_seq) = (self.front, self.back);
        let snake = bisect::middle_snake(
            &front_seq[front.clone()],
            &back_seq[back.clone()],
            self.eq,
            self.deadline,
        );
        match snake {
            Some((x, y)) => {
                trace!(x, y, front = front.len(), back = back.len(), "split at middle snake");
                let (fx, by) = (front.start + x, back.start + y);
                self.stack.push(Task::Solve {
                    front: fx..front.end,
                    back: by..back.end,
                });
                self.stack.push(Task::Solve {
                    front: front.start..fx,
                    back: back.start..by,
                });
            }
            None => self.replace(front, back),
        }
    }

    /// Deletes all of `front` and inserts all of `back`.
    fn replace(&mut self, front: Range<usize>, back: Range<usize>) {
        self.emit_nonempty(Edit::delete(front));
        self.emit_nonempty(Edit::insert(back));
    }

    fn emit_nonempty(&mut self, edit: Edit) {
        if !edit.is_empty() {
            self.out.push(edit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleanup::fixtures::{parts, render};
    use crate::deadline::{Expired, Unbounded};
    use crate::myers::Op::{Delete, Equal, Insert};
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn char_eq(a: &char, b: &char) -> bool {
        a == b
    }

    fn exact(front: &str, back: &str) -> Vec<(Op, String)> {
        let (front, back) = (chars(front), chars(back));
        render(&diff_by(&front, &back, char_eq, &Unbounded))
    }

    fn count(script: &[Edit], op: Op) -> usize {
        script.iter().filter(|e| e.op() == op).map(Edit::len).sum()
    }

    proptest! {
        #[test]
        fn test_length_invariant(old: Vec<u8>, new: Vec<u8>) {
            let result = diff(&old, &new);
            let deletes = count(result.edits(), Op::Delete);
            let equals = count(result.edits(), Op::Equal);
            let inserts = count(result.edits(), Op::Insert);
            prop_assert_eq!(old.len(), deletes + equals);
            prop_assert_eq!(new.len(), inserts + equals);
        }

        #[test]
        fn test_idempotency(els: Vec<u8>) {
            let result = diff(&els, &els);
            let expected: Vec<Edit> = if els.is_empty() {
                vec![]
            } else {
                vec![Edit::equal(0..els.len(), 0..els.len())]
            };
            prop_assert_eq!(result.into_edits(), expected);
        }

        #[test]
        fn test_new_empty(els in prop::collection::vec(any::<u8>(), 1..64)) {
            let result = diff(&els, &[]);
            prop_assert_eq!(result.into_edits(), vec![Edit::delete(0..els.len())]);
        }

        #[test]
        fn test_old_empty(els in prop::collection::vec(any::<u8>(), 1..64)) {
            let result = diff(&[], &els);
            prop_assert_eq!(result.into_edits(), vec![Edit::insert(0..els.len())]);
        }

        #[test]
        fn test_symmetry(old in prop::collection::vec(0u8..4, 0..24),
                         new in prop::collection::vec(0u8..4, 0..24)) {
            let result = diff_by(&old, &new, |a: &u8, b: &u8| a == b, &Unbounded);
            let result_2 = diff_by(&new, &old, |a: &u8, b: &u8| a == b, &Unbounded);

            prop_assert_eq!(count(result.edits(), Op::Equal), count(result_2.edits(), Op::Equal));
            prop_assert_eq!(result.insertions(), result_2.deletions());
            prop_assert_eq!(result.deletions(), result_2.insertions());
        }
    }

    #[test]
    fn test_trivial() {
        assert_eq!(exact("", ""), parts(&[]));
        assert_eq!(exact("abc", "abc"), parts(&[(Equal, "abc")]));
        assert_eq!(exact("a", "b"), parts(&[(Delete, "a"), (Insert, "b")]));
    }

    #[test]
    fn test_containment() {
        assert_eq!(
            exact("abc", "ab123c"),
            parts(&[(Equal, "ab"), (Insert, "123"), (Equal, "c")])
        );
        assert_eq!(
            exact("a123bc", "abc"),
            parts(&[(Equal, "a"), (Delete, "123"), (Equal, "bc")])
        );
        assert_eq!(
            exact("abc", "a123b456c"),
            parts(&[(Equal, "a"), (Insert, "123"), (Equal, "b"), (Insert, "456"), (Equal, "c")])
        );
        assert_eq!(
            exact("a123b456c", "abc"),
            parts(&[(Equal, "a"), (Delete, "123"), (Equal, "b"), (Delete, "456"), (Equal, "c")])
        );
    }

    #[test]
    fn test_real_diffs() {
        assert_eq!(
            exact("Apples are a fruit.", "Bananas are also fruit."),
            parts(&[
                (Delete, "Apple"),
                (Insert, "Banana"),
                (Equal, "s are a"),
                (Insert, "lso"),
                (Equal, " fruit."),
            ])
        );
        assert_eq!(
            exact("ax\t", "\u{0680}x\0"),
            parts(&[
                (Delete, "a"),
                (Insert, "\u{0680}"),
                (Equal, "x"),
                (Delete, "\t"),
                (Insert, "\0"),
            ])
        );
        assert_eq!(
            exact("1ayb2", "abxab"),
            parts(&[
                (Delete, "1"),
                (Equal, "a"),
                (Delete, "y"),
                (Equal, "b"),
                (Delete, "2"),
                (Insert, "xab"),
            ])
        );
        assert_eq!(
            exact("abcy", "xaxcxabc"),
            parts(&[(Insert, "xaxcx"), (Equal, "abc"), (Delete, "y")])
        );
    }

    #[test]
    fn test_overlapping_diffs() {
        assert_eq!(
            exact("ABCDa=bcd=efghijklmnopqrsEFGHIJKLMNOefg", "a-bcd-efghijklmnopqrs"),
            parts(&[
                (Delete, "ABCD"),
                (Equal, "a"),
                (Delete, "="),
                (Insert, "-"),
                (Equal, "bcd"),
                (Delete, "="),
                (Insert, "-"),
                (Equal, "efghijklmnopqrs"),
                (Delete, "EFGHIJKLMNOefg"),
            ])
        );
        assert_eq!(
            exact("a [[Pennsylvania]] and [[New", " and [[Pennsylvania]]"),
            parts(&[
                (Insert, " "),
                (Equal, "a"),
                (Insert, "nd"),
                (Equal, " [[Pennsylvania]]"),
                (Delete, " and [[New"),
            ])
        );
    }

    #[test]
    fn test_default_options() {
        let (front, back) = (chars("a123bc"), chars("abc"));
        assert_eq!(
            render(&diff(&front, &back)),
            parts(&[(Equal, "a"), (Delete, "123"), (Equal, "bc")])
        );
    }

    #[test]
    fn test_expired_deadline() {
        let (front, back) = (chars("abcdef"), chars("xbzdyf"));
        assert_eq!(
            render(&diff_by(&front, &back, char_eq, &Expired)),
            parts(&[(Delete, "abcde"), (Insert, "xbzdy"), (Equal, "f")])
        );
    }

    #[test]
    fn test_bisect() {
        let (front, back) = (chars("cat"), chars("map"));
        assert_eq!(
            render(&bisect(&front, &back, char_eq, &Unbounded)),
            parts(&[(Delete, "c"), (Insert, "m"), (Equal, "a"), (Delete, "t"), (Insert, "p")])
        );
        assert_eq!(
            render(&bisect(&front, &back, char_eq, &Expired)),
            parts(&[(Delete, "cat"), (Insert, "map")])
        );
    }

    #[test]
    fn test_cross_type() {
        let front = [1u32, 2, 3, 4];
        let back = ["one", "three", "four", "five"];
        let named = |n: &u32, w: &&str| matches!((n, *w), (1, "one") | (3, "three") | (4, "four"));
        let script = diff_by(&front, &back, named, &Unbounded);
        assert_eq!(
            script.edits(),
            &[
                Edit::equal(0..1, 0..1),
                Edit::delete(1..2),
                Edit::equal(2..4, 1..3),
                Edit::insert(3..4),
            ]
        );
    }

    #[test]
    fn test_duplicates() {
        let old = vec!["a", "a", "b"];
        let new = vec!["a", "b", "b"];
        let result = diff(&old, &new);
        assert_eq!(result.deletions(), 1);
        assert_eq!(result.insertions(), 1);
        assert_eq!(result.reconstruct_back(), new);
    }

    #[test]
    fn test_long_inputs() {
        let front: Vec<u32> = (0..10_000).map(|i| i % 97).collect();
        let back: Vec<u32> = front
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 50 != 0)
            .map(|(i, &x)| if i % 75 == 0 { x + 1000 } else { x })
            .collect();
        let script = diff_by(&front, &back, |a: &u32, b: &u32| a == b, &Unbounded);
        assert_eq!(script.reconstruct_front(), front);
        assert_eq!(script.reconstruct_back(), back);
    }
}
