//! # Recombining tree
//!
//! $$
//! \mathcal T=\{x^{(i)}\}_{i=0}^{N},\qquad x^{(i)}\in\mathbb R^{i+1}
//! $$
//!
//! Node $j$ of level $i$ is reached by $j$ down-moves and $i-j$ up-moves, so
//! it feeds nodes $j$ and $j+1$ of level $i+1$.
//!
use std::fmt;
use std::ops::Index;

use ndarray::Array1;

use crate::error::LatticeError;
use crate::error::Result;

/// Recombining binomial tree, stored level by level.
#[derive(Debug, Clone, PartialEq)]
pub struct RecombiningTree {
  levels: Vec<Array1<f64>>,
}

impl RecombiningTree {
  /// Validate and wrap a sequence of levels.
  ///
  /// Level `i` must hold exactly `i + 1` nodes and the tree must not be empty.
  pub fn new(levels: Vec<Array1<f64>>) -> Result<Self> {
    check_levels(&levels)?;
    Ok(Self { levels })
  }

  /// Build a tree from nested vectors, e.g. `vec![vec![100.0], vec![115.0, 87.0]]`.
  pub fn from_nested<L>(levels: Vec<L>) -> Result<Self>
  where
    L: Into<Vec<f64>>,
  {
    Self::new(
      levels
        .into_iter()
        .map(|level| Array1::from(level.into()))
        .collect(),
    )
  }

  /// Wrap levels whose shape is guaranteed by construction.
  pub(crate) fn from_levels(levels: Vec<Array1<f64>>) -> Self {
    debug_assert!(check_levels(&levels).is_ok());
    Self { levels }
  }

  /// Number of moves from the root to the last level.
  pub fn steps(&self) -> usize {
    self.levels.len() - 1
  }

  /// Number of levels, `steps + 1`.
  pub fn depth(&self) -> usize {
    self.levels.len()
  }

  /// Value at the single node of level 0.
  pub fn root(&self) -> f64 {
    self.levels[0][0]
  }

  pub fn level(&self, i: usize) -> Option<&Array1<f64>> {
    self.levels.get(i)
  }

  pub fn levels(&self) -> &[Array1<f64>] {
    &self.levels
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Array1<f64>> {
    self.levels.iter()
  }

  /// Keep only the first `depth` levels.
  pub(crate) fn truncated(&self, depth: usize) -> Self {
    Self {
      levels: self.levels.iter().take(depth).cloned().collect(),
    }
  }

  /// Copy the tree out as nested vectors.
  pub fn to_nested(&self) -> Vec<Vec<f64>> {
    self.levels.iter().map(|level| level.to_vec()).collect()
  }
}

impl Index<usize> for RecombiningTree {
  type Output = Array1<f64>;

  fn index(&self, i: usize) -> &Self::Output {
    &self.levels[i]
  }
}

impl<'a> IntoIterator for &'a RecombiningTree {
  type Item = &'a Array1<f64>;
  type IntoIter = std::slice::Iter<'a, Array1<f64>>;

  fn into_iter(self) -> Self::IntoIter {
    self.levels.iter()
  }
}

impl fmt::Display for RecombiningTree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for level in &self.levels {
      let nodes = level
        .iter()
        .map(|x| match f.precision() {
          Some(p) => format!("{x:.p$}"),
          None => x.to_string(),
        })
        .collect::<Vec<_>>();
      writeln!(f, "[{}]", nodes.join(", "))?;
    }
    Ok(())
  }
}

fn check_levels(levels: &[Array1<f64>]) -> Result<()> {
  if levels.is_empty() {
    return Err(LatticeError::Structural(
      "the tree cannot be of zero length".into(),
    ));
  }

  for (i, level) in levels.iter().enumerate() {
    if level.len() != i + 1 {
      return Err(LatticeError::Structural(format!(
        "assuming the tree is recombining, the number of nodes should start from one and \
         increase by one (level {i} has {} nodes)",
        level.len()
      )));
    }
  }

  Ok(())
}
