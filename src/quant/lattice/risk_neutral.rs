//! # Risk-neutral probabilities
//!
//! $$
//! q^{(i)}_j=\frac{S^{(i)}_jR^{(i)}_j-S^{(i+1)}_{j+1}}{S^{(i+1)}_j-S^{(i+1)}_{j+1}},
//! \qquad 1-q^{(i)}_j \text{ for the down move}
//! $$
//!
//! Values are not clamped: a tree that admits arbitrage yields probabilities
//! outside $[0,1]$ and those are passed through unchanged.
//!
use ndarray::s;
use ndarray::Array1;
use tracing::warn;

use super::tree::RecombiningTree;

/// Up and down transition probabilities for levels `0..steps`.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskNeutralProbabilities {
  pub up: Vec<Array1<f64>>,
  pub down: Vec<Array1<f64>>,
}

impl RiskNeutralProbabilities {
  /// Derive the probabilities from adjacent price levels and the growth factors.
  ///
  /// `growth[i]` must hold `i + 1` factors for every `i < prices.steps()`.
  pub fn from_trees(prices: &RecombiningTree, growth: &[Array1<f64>]) -> Self {
    let up = (0..prices.steps())
      .map(|i| {
        let next = &prices[i + 1];
        let hi = next.slice(s![..-1]);
        let lo = next.slice(s![1..]);
        (&prices[i] * &growth[i] - &lo) / (&hi - &lo)
      })
      .collect::<Vec<_>>();
    let down = up
      .iter()
      .map(|q| q.mapv(|x| 1.0 - x))
      .collect::<Vec<_>>();

    let probabilities = Self { up, down };
    if let Some(violation) = probabilities.first_violation() {
      warn!(
        level = violation,
        "risk-neutral probability outside [0, 1]; the tree admits arbitrage"
      );
    }
    probabilities
  }

  /// Number of levels with transitions.
  pub fn steps(&self) -> usize {
    self.up.len()
  }

  /// Whether every up probability lies in `[0, 1]`.
  pub fn is_arbitrage_free(&self) -> bool {
    self.first_violation().is_none()
  }

  fn first_violation(&self) -> Option<usize> {
    self
      .up
      .iter()
      .position(|level| level.iter().any(|q| !(0.0..=1.0).contains(q)))
  }
}
