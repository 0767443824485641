use std::fmt;

/// Which input sequence an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Front => f.write_str("front"),
            Side::Back => f.write_str("back"),
        }
    }
}

/// Errors raised when an edit script is assembled from caller-supplied parts
/// or configured with unusable options.
///
/// Diffing itself never fails: every pair of sequences has an edit script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    #[error("edit {index}: span {start}..{end} does not fit the {side} sequence of length {len}")]
    InvalidSpan {
        side: Side,
        index: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("edit {index}: {side} span starts at {found}, expected {expected}")]
    Gap {
        side: Side,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("edits cover {covered} of {len} {side} elements")]
    Incomplete { side: Side, covered: usize, len: usize },

    #[error("edit {index}: equal spans differ in length ({front} vs {back})")]
    UnevenEqual {
        index: usize,
        front: usize,
        back: usize,
    },

    #[error("edit {index}: elements at offset {offset} are not equivalent")]
    NotEquivalent { index: usize, offset: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

pub type DiffResult<T> = Result<T, DiffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DiffError::Gap {
            side: Side::Back,
            index: 2,
            expected: 4,
            found: 5,
        };
        assert_eq!(err.to_string(), "edit 2: back span starts at 5, expected 4");

        let err = DiffError::Incomplete {
            side: Side::Front,
            covered: 3,
            len: 7,
        };
        assert_eq!(err.to_string(), "edits cover 3 of 7 front elements");
    }
}
