//! # Traits
//!
//! $$
//! \text{configure}\to\text{validate}\to\text{price}\to\text{hedge}
//! $$
//!
use ndarray::Array1;

use crate::error::LatticeError;
use crate::error::Result;
use crate::quant::lattice::Valuation;

/// Pricer trait.
pub trait PricerExt {
  /// Run the full pipeline and return the premium.
  fn calculate_price(&mut self) -> f64;

  /// State left behind by the last call to [`PricerExt::calculate_price`].
  fn valuation(&self) -> Option<&Valuation>;

  /// Premium of the last run.
  fn premium(&self) -> Option<f64> {
    self.valuation().map(|valuation| valuation.premium)
  }

  /// Hedge ratios at every node of levels `1..=steps`.
  fn hedge_ratios(&self) -> Result<Vec<Array1<f64>>> {
    self
      .valuation()
      .map(Valuation::hedge_ratios)
      .ok_or_else(|| {
        LatticeError::NotPriced("call calculate_price before asking for hedge ratios".into())
      })
  }
}
