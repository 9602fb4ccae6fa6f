//! # Backward induction
//!
//! $$
//! V^{(N)}=g\big(S^{(N)}\big),\qquad
//! C^{(i)}_j=D^{(i)}_j\left(q^{(i)}_jV^{(i+1)}_j+(1-q^{(i)}_j)V^{(i+1)}_{j+1}\right),\qquad
//! V^{(i)}=h_i\big(C^{(i)}\big)
//! $$
//!
//! where $g$ is the terminal value and $h_i$ an optional early-exercise floor.
//!
use ndarray::s;
use ndarray::Array1;
use tracing::trace;

use super::risk_neutral::RiskNeutralProbabilities;
use super::tree::RecombiningTree;

/// Instrument-specific pieces of the backward traversal.
pub trait BackwardPayoff {
  /// Value at the last level, from the terminal prices.
  fn terminal(&self, prices: &Array1<f64>) -> Array1<f64>;

  /// Floor applied to the continuation value at an interior level.
  fn exercise(&self, continuation: Array1<f64>, _prices: &Array1<f64>) -> Array1<f64> {
    continuation
  }

  /// Whether continuation values are discounted over each step.
  fn discounted(&self) -> bool {
    true
  }
}

/// Roll the terminal values back to the root.
///
/// `discounts[i]` must hold `i + 1` factors for every `i < prices.steps()`;
/// it is ignored when the payoff is not discounted.
pub fn backward_induction<P>(
  prices: &RecombiningTree,
  probabilities: &RiskNeutralProbabilities,
  discounts: &[Array1<f64>],
  payoff: &P,
) -> RecombiningTree
where
  P: BackwardPayoff + ?Sized,
{
  let steps = prices.steps();
  let mut levels = Vec::with_capacity(steps + 1);
  levels.push(payoff.terminal(&prices[steps]));

  for i in (0..steps).rev() {
    let next: &Array1<f64> = &levels[levels.len() - 1];
    let mut continuation = &next.slice(s![..-1]) * &probabilities.up[i]
      + &next.slice(s![1..]) * &probabilities.down[i];
    if payoff.discounted() {
      continuation *= &discounts[i];
    }

    let values = payoff.exercise(continuation, &prices[i]);
    trace!(level = i, nodes = values.len(), "backward step");
    levels.push(values);
  }

  levels.reverse();
  RecombiningTree::from_levels(levels)
}
