//! # Valuation
//!
//! $$
//! S\to\big(R,D\big)\to q\to V,\qquad \text{premium}=V^{(0)}_0
//! $$
//!
use ndarray::Array1;
use tracing::debug;
use tracing::debug_span;

use super::backward::backward_induction;
use super::backward::BackwardPayoff;
use super::base::InterestFactors;
use super::base::Lattice;
use super::hedge::hedge_ratios;
use super::risk_neutral::RiskNeutralProbabilities;
use super::tree::RecombiningTree;

/// Everything one pricing run leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
  pub price_tree: RecombiningTree,
  pub interest_factors: InterestFactors,
  pub probabilities: RiskNeutralProbabilities,
  /// Option payoffs or futures prices, shaped like `price_tree`.
  pub value_tree: RecombiningTree,
  pub premium: f64,
}

impl Valuation {
  /// Run the pipeline: price tree, interest factors, probabilities, backward induction.
  pub fn run<P>(lattice: &Lattice, payoff: &P) -> Self
  where
    P: BackwardPayoff + ?Sized,
  {
    let config = lattice.config();
    let _span = debug_span!(
      "valuation",
      steps = config.steps(),
      method = %config.tree_method(),
      strategy = config.strategy()
    )
    .entered();

    let price_tree = lattice.build_price_tree();
    debug!(spot = price_tree.root(), "price tree built");

    let interest_factors = lattice.build_interest_factors();
    let probabilities = RiskNeutralProbabilities::from_trees(&price_tree, &interest_factors.growth);
    debug!(
      arbitrage_free = probabilities.is_arbitrage_free(),
      "risk-neutral probabilities derived"
    );

    let value_tree = backward_induction(
      &price_tree,
      &probabilities,
      &interest_factors.discounts,
      payoff,
    );
    let premium = value_tree.root();
    debug!(premium, "priced");

    Self {
      price_tree,
      interest_factors,
      probabilities,
      value_tree,
      premium,
    }
  }

  /// Hedge ratios from the value and price trees of this run.
  pub fn hedge_ratios(&self) -> Vec<Array1<f64>> {
    hedge_ratios(&self.value_tree, &self.price_tree)
  }
}
