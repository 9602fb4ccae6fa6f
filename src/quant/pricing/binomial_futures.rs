//! # Binomial futures
//!
//! $$
//! F^{(N)}=S^{(N)},\qquad F^{(i)}_j=q^{(i)}_jF^{(i+1)}_j+(1-q^{(i)}_j)F^{(i+1)}_{j+1}
//! $$
//!
//! Futures are marked to market, so the rollback carries no discounting.
//!
use ndarray::Array1;

use crate::quant::lattice::BackwardPayoff;
use crate::quant::lattice::Lattice;
use crate::quant::lattice::LatticeConfig;
use crate::quant::lattice::RecombiningTree;
use crate::quant::lattice::Valuation;
use crate::traits::PricerExt;

#[derive(Debug, Clone, Copy, Default)]
pub struct FuturesPayoff;

impl BackwardPayoff for FuturesPayoff {
  fn terminal(&self, prices: &Array1<f64>) -> Array1<f64> {
    prices.clone()
  }

  fn discounted(&self) -> bool {
    false
  }
}

/// Futures price on a binomial lattice.
#[derive(Debug, Clone)]
pub struct BinomialFutures {
  lattice: Lattice,
  valuation: Option<Valuation>,
}

impl BinomialFutures {
  /// Any strike in the config is ignored.
  pub fn new(config: LatticeConfig) -> Self {
    Self {
      lattice: Lattice::new(config),
      valuation: None,
    }
  }

  pub fn config(&self) -> &LatticeConfig {
    self.lattice.config()
  }

  /// Futures price at every node of the last run.
  pub fn futures_tree(&self) -> Option<&RecombiningTree> {
    self.valuation.as_ref().map(|valuation| &valuation.value_tree)
  }
}

impl PricerExt for BinomialFutures {
  fn calculate_price(&mut self) -> f64 {
    let valuation = Valuation::run(&self.lattice, &FuturesPayoff);
    let premium = valuation.premium;
    self.valuation = Some(valuation);
    premium
  }

  fn valuation(&self) -> Option<&Valuation> {
    self.valuation.as_ref()
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;
  use crate::error::LatticeError;
  use crate::quant::lattice::Crr;

  fn futures() -> BinomialFutures {
    let config = LatticeConfig::builder()
      .price_tree(vec![
        vec![100.0],
        vec![115.0, 87.0],
        vec![133.0, 100.0, 75.0],
        vec![152.0, 115.0, 87.0, 65.0],
      ])
      .rate_tree(vec![
        vec![0.02469261],
        vec![0.01980263, 0.0295588],
        vec![0.00995033, 0.02469261, 0.03440143],
      ])
      .maturity(3.0)
      .build()
      .unwrap();
    BinomialFutures::new(config)
  }

  #[test]
  fn futures_price() {
    let mut futures = futures();
    let price = futures.calculate_price();

    assert_abs_diff_eq!(price, 107.12, epsilon = 5e-3);
    assert_abs_diff_eq!(price, 107.12204393569074, epsilon = 1e-9);
  }

  #[test]
  fn futures_tree_ends_at_spot_prices() {
    let mut futures = futures();
    assert!(futures.futures_tree().is_none());
    futures.calculate_price();

    let valuation = futures.valuation().unwrap();
    let tree = futures.futures_tree().unwrap();
    assert_eq!(tree.depth(), 4);
    assert_eq!(tree[3], valuation.price_tree[3]);
  }

  #[test]
  fn futures_price_is_forward_price_on_consistent_tree() {
    let config = LatticeConfig::builder()
      .spot(80.0)
      .maturity(1.5)
      .steps(30)
      .flat_rate(0.04)
      .volatility(0.2)
      .strategy(Crr)
      .build()
      .unwrap();
    let mut futures = BinomialFutures::new(config);

    assert_abs_diff_eq!(
      futures.calculate_price(),
      80.0 * (0.04f64 * 1.5).exp(),
      epsilon = 1e-9
    );
  }

  #[test]
  fn hedge_ratios_after_pricing() {
    let mut futures = futures();
    assert!(matches!(futures.hedge_ratios(), Err(LatticeError::NotPriced(_))));

    futures.calculate_price();
    let ratios = futures.hedge_ratios().unwrap();

    assert_eq!(ratios.len(), 3);
    for ratio in ratios[2].iter() {
      assert_abs_diff_eq!(*ratio, 1.0, epsilon = 1e-12);
    }
  }
}
