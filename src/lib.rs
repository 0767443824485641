//! Generic sequence diffing.
//!
//! `patchwork` computes edit scripts between two sequences with Myers'
//! algorithm. The two sides may hold different element types: elements are
//! matched through a caller-supplied equivalence `eq(front, back)`. Computation
//! is bounded by a [`Deadline`]; once it expires the engine stops looking for a
//! minimal script and settles for a correct one.
//!
//! ```
//! use patchwork::{diff, Op};
//!
//! let front: Vec<char> = "Apples are a fruit.".chars().collect();
//! let back: Vec<char> = "Bananas are also fruit.".chars().collect();
//!
//! let mut script = diff(&front, &back);
//! script.cleanup_semantic();
//!
//! assert_eq!(script.reconstruct_front(), front);
//! assert_eq!(script.reconstruct_back(), back);
//! assert!(script.edits().iter().any(|edit| edit.op() == Op::Equal));
//! ```
//!
//! Scripts address the inputs by index ranges ([`Edit`]); [`EditScript::changes`]
//! resolves them to slices.

pub mod cleanup;
pub mod deadline;
pub mod error;
pub mod myers;
pub mod options;
pub mod script;

pub use cleanup::{cleanup_efficiency, cleanup_merge, cleanup_semantic};
pub use deadline::{Deadline, Expired, Unbounded};
pub use error::{DiffError, DiffResult, Side};
pub use myers::{bisect, diff, diff_by, Change, Edit, Op, PartialEqFn};
pub use options::{DiffOptions, DEFAULT_EDIT_COST, DEFAULT_TIMEOUT};
pub use script::{levenshtein, x_index, EditScript};
