//! Cooperative time budget for the bisection search.
//!
//! The engine asks exactly one question, once per edit-distance layer of the
//! Myers search: "has the budget run out?". Anything answering it can drive a
//! diff, which keeps the engine deterministic under test.

use std::time::Instant;

pub trait Deadline {
    /// Whether a time budget applies at all.
    ///
    /// Unbounded diffs skip the half-match shortcut, which trades minimality
    /// for speed and only makes sense when the clock is running.
    fn is_bounded(&self) -> bool;

    fn has_expired(&self) -> bool;
}

impl Deadline for Instant {
    fn is_bounded(&self) -> bool {
        true
    }

    fn has_expired(&self) -> bool {
        Instant::now() >= *self
    }
}

/// `None` means "diff until exact".
impl Deadline for Option<Instant> {
    fn is_bounded(&self) -> bool {
        self.is_some()
    }

    fn has_expired(&self) -> bool {
        self.as_ref().is_some_and(Deadline::has_expired)
    }
}

impl<D: Deadline + ?Sized> Deadline for &D {
    fn is_bounded(&self) -> bool {
        (**self).is_bounded()
    }

    fn has_expired(&self) -> bool {
        (**self).has_expired()
    }
}

/// Never expires. Produces minimal diffs regardless of cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unbounded;

impl Deadline for Unbounded {
    fn is_bounded(&self) -> bool {
        false
    }

    fn has_expired(&self) -> bool {
        false
    }
}

/// Already expired: the bisection gives up immediately and falls back to
/// deleting the whole front and inserting the whole back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expired;

impl Deadline for Expired {
    fn is_bounded(&self) -> bool {
        true
    }

    fn has_expired(&self) -> bool {
        true
    }
}
