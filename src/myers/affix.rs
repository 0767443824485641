//! Element-wise scans shared by the diff driver and the cleanup passes.
//!
//! The public helpers compare a front slice against a back slice through the
//! equivalence. The crate-internal ones take lengths and an index comparator
//! `same(i, j)` instead, so the caller decides which sequence plays which role
//! (the half-match search, for instance, may treat either side as the long one).

/// Length of the longest common prefix of `front` and `back`.
///
/// ```
/// use patchwork::myers::common_prefix;
///
/// assert_eq!(common_prefix(b"1234abcdef", b"1234xyz", |a, b| a == b), 4);
/// assert_eq!(common_prefix(b"abc", b"xyz", |a, b| a == b), 0);
/// ```
pub fn common_prefix<F, B, E>(front: &[F], back: &[B], eq: E) -> usize
where
    E: Fn(&F, &B) -> bool,
{
    prefix_by(front.len(), back.len(), |i, j| eq(&front[i], &back[j]))
}

/// Length of the longest common suffix of `front` and `back`.
pub fn common_suffix<F, B, E>(front: &[F], back: &[B], eq: E) -> usize
where
    E: Fn(&F, &B) -> bool,
{
    suffix_by(front.len(), back.len(), |i, j| eq(&front[i], &back[j]))
}

/// Length of the longest suffix of `front` that is equivalent to a prefix of `back`.
///
/// ```
/// use patchwork::myers::common_overlap;
///
/// assert_eq!(common_overlap(b"123456xxx", b"xxxabcd", |a, b| a == b), 3);
/// ```
pub fn common_overlap<F, B, E>(front: &[F], back: &[B], eq: E) -> usize
where
    E: Fn(&F, &B) -> bool,
{
    overlap_by(front.len(), back.len(), |i, j| eq(&front[i], &back[j]))
}

pub(crate) fn prefix_by(a_len: usize, b_len: usize, same: impl Fn(usize, usize) -> bool) -> usize {
    (0..a_len.min(b_len)).take_while(|&t| same(t, t)).count()
}

pub(crate) fn suffix_by(a_len: usize, b_len: usize, same: impl Fn(usize, usize) -> bool) -> usize {
    (0..a_len.min(b_len))
        .take_while(|&t| same(a_len - 1 - t, b_len - 1 - t))
        .count()
}

/// First position `h >= from` at which the whole needle matches the haystack.
/// `same(h, p)` compares haystack element `h` with needle element `p`.
pub(crate) fn find_by(
    hay_len: usize,
    needle_len: usize,
    from: usize,
    same: impl Fn(usize, usize) -> bool,
) -> Option<usize> {
    let last = hay_len.checked_sub(needle_len)?;
    (from..=last).find(|&h| (0..needle_len).all(|p| same(h + p, p)))
}

/// Suffix of `a` overlapping a prefix of `b`; `same(i, j)` compares `a[i]` with `b[j]`.
///
/// Grows a candidate suffix and jumps straight to the next place it occurs in
/// `b`, so only lengths that can still match are ever verified in full.
pub(crate) fn overlap_by(a_len: usize, b_len: usize, same: impl Fn(usize, usize) -> bool) -> usize {
    if a_len == 0 || b_len == 0 {
        return 0;
    }
    // Only the last `n` of `a` and the first `n` of `b` can take part.
    let n = a_len.min(b_len);
    let skip = a_len - n;
    let same = |i: usize, j: usize| same(skip + i, j);

    if (0..n).all(|t| same(t, t)) {
        return n;
    }

    let mut best = 0;
    let mut len = 1;
    while len <= n {
        let Some(found) = find_by(n, len, 0, |h, p| same(n - len + p, h)) else {
            return best;
        };
        len += found;
        if found == 0 || (0..len).all(|t| same(n - len + t, t)) {
            best = len;
            len += 1;
        }
    }
    best
}
