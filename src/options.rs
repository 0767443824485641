//! Tunables for a diff run.

use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};
use crate::myers::{self, PartialEqFn};
use crate::script::EditScript;

/// Time budget granted to a diff before the bisection starts giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Cost, in elements, of an extra edit for [`EditScript::cleanup_efficiency`].
pub const DEFAULT_EDIT_COST: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiffOptions {
    /// `None` (or a zero duration) diffs until the result is exact.
    pub timeout: Option<Duration>,
    pub edit_cost: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            timeout: Some(DEFAULT_TIMEOUT),
            edit_cost: DEFAULT_EDIT_COST,
        }
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_edit_cost(mut self, edit_cost: usize) -> Self {
        self.edit_cost = edit_cost;
        self
    }

    pub fn validate(&self) -> DiffResult<()> {
        if self.edit_cost == 0 {
            return Err(DiffError::InvalidOptions(
                "edit_cost must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute deadline for a run starting now.
    pub fn deadline(&self) -> Option<Instant> {
        self.timeout
            .filter(|timeout| !timeout.is_zero())
            .and_then(|timeout| Instant::now().checked_add(timeout))
    }

    pub fn diff_by<'a, F, B, E>(
        &self,
        front: &'a [F],
        back: &'a [B],
        eq: E,
    ) -> EditScript<'a, F, B, E>
    where
        E: Fn(&F, &B) -> bool,
    {
        myers::diff_by(front, back, eq, &self.deadline())
    }

    pub fn diff<'a, T: PartialEq>(
        &self,
        front: &'a [T],
        back: &'a [T],
    ) -> EditScript<'a, T, T, PartialEqFn<T>> {
        self.diff_by(front, back, <T as PartialEq>::eq as PartialEqFn<T>)
    }

    /// Runs [`EditScript::cleanup_efficiency`] with the configured edit cost.
    pub fn cleanup_efficiency<F, B, E>(
        &self,
        script: &mut EditScript<'_, F, B, E>,
    ) -> DiffResult<()>
    where
        E: Fn(&F, &B) -> bool,
    {
        self.validate()?;
        script.cleanup_efficiency(self.edit_cost);
        Ok(())
    }
}
