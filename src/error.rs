//! # Errors
//!
//! Every failure the lattice can report is a caller-input defect detected
//! before any tree is computed, or a request for results that do not exist yet.
//!
use thiserror::Error;

/// Lattice configuration and state errors.
///
/// Each variant carries a message naming the violated invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
  /// A required input is absent (spot, step count, move pair, rate, strike).
  #[error("missing parameter: {0}")]
  MissingParameter(String),

  /// Two inputs were given where only one of them is allowed.
  #[error("mutually exclusive parameters: {0}")]
  MutuallyExclusive(String),

  /// A specified pair has both entries equal to zero.
  #[error("degenerate value: {0}")]
  Degenerate(String),

  /// A value lies outside its admissible range.
  #[error("out of range: {0}")]
  OutOfRange(String),

  /// A supplied price or rate tree is not a valid recombining tree.
  #[error("malformed tree: {0}")]
  Structural(String),

  /// The tree construction mode does not match the supplied inputs.
  #[error("inconsistent tree method: {0}")]
  ModeConsistency(String),

  /// A tree construction mode name could not be parsed.
  #[error("unknown tree method '{0}': expected 'multiply', 'add' or 'direct'")]
  UnknownTreeMethod(String),

  /// Results were requested before the lattice was priced.
  #[error("not yet priced: {0}")]
  NotPriced(String),
}

pub type Result<T> = std::result::Result<T, LatticeError>;
