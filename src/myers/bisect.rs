use tracing::debug;

use crate::deadline::Deadline;

/// Furthest-reaching x per diagonal `k`, stored around a fixed offset.
/// Unreached diagonals hold -1.
#[derive(Clone)]
struct V {
    data: Vec<isize>,
    offset: isize,
}

impl V {
    fn new(size: usize) -> Self {
        V {
            data: vec![-1; 2 * size + 2],
            offset: size as isize,
        }
    }

    fn get(&self, k: isize) -> isize {
        self.data[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, x: isize) {
        self.data[(k + self.offset) as usize] = x;
    }

    /// Like `get`, but `None` for diagonals outside the array or not reached yet.
    fn reach(&self, k: isize) -> Option<isize> {
        let index = usize::try_from(k + self.offset).ok()?;
        self.data.get(index).copied().filter(|&x| x >= 0)
    }
}

/// Finds the middle snake of the Myers search by walking forward from the
/// top-left corner and backward from the bottom-right corner at once.
///
/// Returns the point `(x, y)` where the two paths overlap, splitting the
/// problem into `front[..x]`/`back[..y]` and `front[x..]`/`back[y..]`. Returns
/// `None` if the deadline expires first or the paths never meet, in which
/// case the caller treats the whole pair as one replacement.
pub(crate) fn middle_snake<F, B, E, D>(
    front: &[F],
    back: &[B],
    eq: &E,
    deadline: &D,
) -> Option<(usize, usize)>
where
    E: Fn(&F, &B) -> bool,
    D: Deadline + ?Sized,
{
    let n = front.len() as isize;
    let m = back.len() as isize;
    let max_d = (n + m + 1) / 2;
    let mut v1 = V::new(max_d as usize);
    let mut v2 = V::new(max_d as usize);
    v1.set(1, 0);
    v2.set(1, 0);

    let delta = n - m;
    // With an odd delta the forward walk is the one that hits the reverse paths.
    let forward_meets = delta % 2 != 0;

    // Trim diagonals that already ran off the edge of the grid.
    let mut k1_start = 0;
    let mut k1_end = 0;
    let mut k2_start = 0;
    let mut k2_end = 0;

    for d in 0..max_d {
        if deadline.has_expired() {
            debug!(d, front = n, back = m, "deadline expired during bisection");
            return None;
        }

        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let mut x1 = if k1 == -d || (k1 != d && v1.get(k1 - 1) < v1.get(k1 + 1)) {
                v1.get(k1 + 1)
            } else {
                v1.get(k1 - 1) + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n && y1 < m && eq(&front[x1 as usize], &back[y1 as usize]) {
                x1 += 1;
                y1 += 1;
            }
            v1.set(k1, x1);
            if x1 > n {
                k1_end += 2;
            } else if y1 > m {
                k1_start += 2;
            } else if forward_meets {
                if let Some(x2) = v2.reach(delta - k1) {
                    // Mirror the reverse reach onto top-left coordinates.
                    if x1 >= n - x2 {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let mut x2 = if k2 == -d || (k2 != d && v2.get(k2 - 1) < v2.get(k2 + 1)) {
                v2.get(k2 + 1)
            } else {
                v2.get(k2 - 1) + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n
                && y2 < m
                && eq(&front[(n - x2 - 1) as usize], &back[(m - y2 - 1) as usize])
            {
                x2 += 1;
                y2 += 1;
            }
            v2.set(k2, x2);
            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !forward_meets {
                let k1 = delta - k2;
                if let Some(x1) = v1.reach(k1) {
                    let y1 = x1 - k1;
                    if x1 >= n - x2 {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k2 += 2;
        }
    }

    debug!(front = n, back = m, "no middle snake found");
    None
}
