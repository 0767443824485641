use std::ops::Range;

use super::affix::{find_by, prefix_by, suffix_by};

/// A common block at least half as long as the longer sequence, with the
/// fragments on either side of it. Fragments are relative to the slices the
/// match was searched in until shifted with [`HalfMatch::offset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HalfMatch {
    pub front_before: Range<usize>,
    pub front_after: Range<usize>,
    pub back_before: Range<usize>,
    pub back_after: Range<usize>,
    pub common_front: Range<usize>,
    pub common_back: Range<usize>,
}

impl HalfMatch {
    fn new(
        front_len: usize,
        back_len: usize,
        common_front: Range<usize>,
        common_back: Range<usize>,
    ) -> Self {
        HalfMatch {
            front_before: 0..common_front.start,
            front_after: common_front.end..front_len,
            back_before: 0..common_back.start,
            back_after: common_back.end..back_len,
            common_front,
            common_back,
        }
    }

    pub fn offset(self, front: usize, back: usize) -> Self {
        let shift = |r: Range<usize>, by: usize| r.start + by..r.end + by;
        HalfMatch {
            front_before: shift(self.front_before, front),
            front_after: shift(self.front_after, front),
            back_before: shift(self.back_before, back),
            back_after: shift(self.back_after, back),
            common_front: shift(self.common_front, front),
            common_back: shift(self.common_back, back),
        }
    }
}

/// Looks for a common block covering at least half of the longer sequence.
///
/// The block is seeded from a quarter-length slice of the longer sequence
/// taken at its first and second quarter marks; the longer of the two results
/// wins. Speed-up only: the resulting diff may not be minimal.
pub(crate) fn half_match<F, B, E>(front: &[F], back: &[B], eq: &E) -> Option<HalfMatch>
where
    E: Fn(&F, &B) -> bool,
{
    let front_long = front.len() > back.len();
    let (long, short) = if front_long {
        (front.len(), back.len())
    } else {
        (back.len(), front.len())
    };
    if long < 4 || short * 2 < long {
        return None;
    }

    let same = |l: usize, s: usize| {
        if front_long {
            eq(&front[l], &back[s])
        } else {
            eq(&front[s], &back[l])
        }
    };

    let first = seeded_match(long, short, (long + 3) / 4, &same);
    let second = seeded_match(long, short, (long + 1) / 2, &same);
    let (in_long, in_short) = match (first, second) {
        (None, None) => return None,
        (Some(found), None) | (None, Some(found)) => found,
        (Some(first), Some(second)) => {
            if first.0.len() > second.0.len() {
                first
            } else {
                second
            }
        }
    };

    let (common_front, common_back) = if front_long {
        (in_long, in_short)
    } else {
        (in_short, in_long)
    };
    Some(HalfMatch::new(front.len(), back.len(), common_front, common_back))
}

/// Longest block around the seed `long[at..at + long / 4]` that also occurs in
/// the short sequence. Returns its spans in (long, short).
fn seeded_match(
    long: usize,
    short: usize,
    at: usize,
    same: &impl Fn(usize, usize) -> bool,
) -> Option<(Range<usize>, Range<usize>)> {
    let seed = long / 4;
    let mut best = None;
    let mut best_len = 0;
    let mut from = 0;
    while let Some(j) = find_by(short, seed, from, |h, p| same(at + p, h)) {
        let prefix = prefix_by(long - at, short - j, |a, b| same(at + a, j + b));
        let suffix = suffix_by(at, j, same);
        if best_len < prefix + suffix {
            best_len = prefix + suffix;
            best = Some((at - suffix..at + prefix, j - suffix..j + prefix));
        }
        from = j + 1;
    }
    best.filter(|_| best_len * 2 >= long)
}
