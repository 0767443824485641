use patchwork::*;
use proptest::prelude::*;
use std::cell::Cell;
use std::time::Instant;

fn same(a: &u8, b: &u8) -> bool {
    a == b
}

/// Length of the longest common subsequence.
fn lcs(a: &[u8], b: &[u8]) -> usize {
    let mut table = vec![vec![0; b.len() + 1]; a.len() + 1];
    for i in 0..a.len() {
        for j in 0..b.len() {
            table[i + 1][j + 1] = if a[i] == b[j] {
                table[i][j] + 1
            } else {
                table[i][j + 1].max(table[i + 1][j])
            };
        }
    }
    table[a.len()][b.len()]
}

/// Classic edit distance with unit-cost substitutions.
fn edit_distance(a: &[u8], b: &[u8]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for i in 0..a.len() {
        let mut row = vec![i + 1; b.len() + 1];
        for j in 0..b.len() {
            let substitute = prev[j] + usize::from(a[i] != b[j]);
            row[j + 1] = substitute.min(prev[j + 1] + 1).min(row[j] + 1);
        }
        prev = row;
    }
    prev[b.len()]
}

fn equal_len(script: &EditScript<'_, u8, u8, impl Fn(&u8, &u8) -> bool>) -> usize {
    script.edits().iter().filter(|e| e.is_equal()).map(Edit::len).sum()
}

fn assert_valid(
    script: &EditScript<'_, u8, u8, impl Fn(&u8, &u8) -> bool>,
    front: &[u8],
    back: &[u8],
) {
    assert_eq!(script.reconstruct_front(), front);
    assert_eq!(script.reconstruct_back(), back);
    assert!(EditScript::new(front, back, script.edits().to_vec(), same).is_ok());
    assert!(script.edits().iter().all(|e| !e.is_empty()));
}

/// Expires after a fixed number of checks.
struct Countdown(Cell<usize>);

impl Deadline for Countdown {
    fn is_bounded(&self) -> bool {
        true
    }

    fn has_expired(&self) -> bool {
        let left = self.0.get();
        self.0.set(left.saturating_sub(1));
        left == 0
    }
}

fn small_seq() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 0..40)
}

proptest! {
    #[test]
    fn test_reconstruction(front in small_seq(), back in small_seq()) {
        assert_valid(&diff(&front, &back), &front, &back);
        assert_valid(&diff_by(&front, &back, same, &Unbounded), &front, &back);
        assert_valid(&diff_by(&front, &back, same, &Expired), &front, &back);
    }

    #[test]
    fn test_reconstruction_after_cleanup(
        front in small_seq(),
        back in small_seq(),
        cost in 1usize..8,
    ) {
        let mut script = diff(&front, &back);
        script.cleanup_semantic();
        assert_valid(&script, &front, &back);

        let mut script = diff(&front, &back);
        script.cleanup_efficiency(cost);
        assert_valid(&script, &front, &back);
    }

    #[test]
    fn test_merge_is_fixed_point(front in small_seq(), back in small_seq()) {
        let mut script = diff_by(&front, &back, same, &Unbounded);
        script.cleanup_semantic();
        script.cleanup_merge();
        let once = script.edits().to_vec();
        script.cleanup_merge();
        prop_assert_eq!(script.edits(), &once[..]);
    }

    #[test]
    fn test_equal_inputs(els in prop::collection::vec(any::<u8>(), 0..64)) {
        let script = diff(&els, &els);
        prop_assert!(script.is_unchanged());
        prop_assert!(script.len() <= 1);
        prop_assert_eq!(script.levenshtein(), 0);
    }

    #[test]
    fn test_unbounded_is_minimal(front in small_seq(), back in small_seq()) {
        let script = diff_by(&front, &back, same, &Unbounded);
        prop_assert_eq!(equal_len(&script), lcs(&front, &back));
    }

    #[test]
    fn test_levenshtein_bounds(front in small_seq(), back in small_seq()) {
        let script = diff(&front, &back);
        let distance = script.levenshtein();
        prop_assert!(distance >= edit_distance(&front, &back));
        prop_assert!(distance <= front.len() + back.len());
    }

    #[test]
    fn test_levenshtein_single_edit(
        base in prop::collection::vec(0u8..4, 1..40),
        at in any::<prop::sample::Index>(),
        value in 0u8..4,
    ) {
        let i = at.index(base.len());

        let mut substituted = base.clone();
        substituted[i] = value;
        let expected = usize::from(base[i] != value);
        prop_assert_eq!(diff(&base, &substituted).levenshtein(), expected);

        let mut inserted = base.clone();
        inserted.insert(i, value);
        prop_assert_eq!(diff(&base, &inserted).levenshtein(), 1);

        let mut removed = base.clone();
        removed.remove(i);
        prop_assert_eq!(diff(&base, &removed).levenshtein(), 1);
    }

    #[test]
    fn test_x_index_stays_in_bounds(front in small_seq(), back in small_seq(), loc in 0usize..40) {
        let script = diff(&front, &back);
        prop_assume!(loc <= front.len());
        prop_assert!(script.x_index(loc) <= back.len());
    }

    #[test]
    fn test_early_expiry(front in small_seq(), back in small_seq(), checks in 0usize..6) {
        let deadline = Countdown(Cell::new(checks));
        assert_valid(&diff_by(&front, &back, same, &deadline), &front, &back);
    }
}

#[test]
fn test_expired_replaces_middle() {
    let front: Vec<char> = "abcdef".chars().collect();
    let back: Vec<char> = "xbzdyf".chars().collect();
    let script = diff_by(&front, &back, |a: &char, b: &char| a == b, &Expired);
    let changes: Vec<Change<'_, char, char>> = script.changes().collect();
    assert_eq!(
        changes,
        vec![
            Change::Delete(&front[..5]),
            Change::Insert(&back[..5]),
            Change::Equal(&front[5..], &back[5..]),
        ]
    );
}

#[test]
fn test_instant_deadline_in_the_past() {
    let front: Vec<u8> = (0..200).map(|i| (i * 7 % 13) as u8).collect();
    let back: Vec<u8> = (0..200).map(|i| (i * 5 % 11) as u8).collect();
    let deadline = Instant::now();
    let script = diff_by(&front, &back, same, &deadline);
    assert_valid(&script, &front, &back);
}

#[test]
fn test_cross_type_diff() {
    let front = [3u32, 1, 4, 1, 5, 9, 2, 6];
    let back = ["three", "one", "four", "one", "five", "nine", "two", "six"];
    let names = ["zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine"];
    let spelled = |n: &u32, w: &&str| names[*n as usize] == *w;

    let script = diff_by(&front, &back, spelled, &Unbounded);
    assert_eq!(script.edits(), &[Edit::equal(0..8, 0..8)]);

    let shorter = &back[..7];
    let script = DiffOptions::default().diff_by(&front, shorter, spelled);
    assert_eq!(script.edits(), &[Edit::equal(0..7, 0..7), Edit::delete(7..8)]);
    assert_eq!(script.deletions(), 1);
}

#[test]
fn test_semantic_cleanup_is_readable() {
    let front: Vec<char> = "mouse".chars().collect();
    let back: Vec<char> = "sofas".chars().collect();
    let mut script = diff_by(&front, &back, |a: &char, b: &char| a == b, &Unbounded);
    script.cleanup_semantic();
    let ops: Vec<Op> = script.edits().iter().map(Edit::op).collect();
    assert_eq!(ops, vec![Op::Delete, Op::Insert]);
    assert_eq!(script.reconstruct_back(), back);
}

#[test]
fn test_invalid_script_is_rejected() {
    let front = [1u8, 2, 3];
    let back = [1u8, 2];
    let err = EditScript::new(&front, &back, vec![Edit::equal(0..2, 0..2)], same).unwrap_err();
    assert_eq!(
        err,
        DiffError::Incomplete {
            side: Side::Front,
            covered: 2,
            len: 3
        }
    );
}

#[test]
fn test_free_function_passes() {
    let front: Vec<u8> = b"abxyzcd".to_vec();
    let back: Vec<u8> = b"12xyz34".to_vec();
    let mut script = diff_by(&front, &back, same, &Unbounded);
    cleanup_efficiency(&mut script, DEFAULT_EDIT_COST);
    cleanup_semantic(&mut script);
    cleanup_merge(&mut script);
    assert_valid(&script, &front, &back);
    assert_eq!(levenshtein(script.edits()), script.levenshtein());
}

#[cfg(feature = "serde")]
#[test]
fn test_edits_serialize() {
    let front = [1u8, 2, 3];
    let back = [1u8, 3];
    let script = diff(&front, &back);
    let json = serde_json::to_string(script.edits()).unwrap();
    let edits: Vec<Edit> = serde_json::from_str(&json).unwrap();
    assert!(EditScript::new(&front, &back, edits, same).is_ok());
}
