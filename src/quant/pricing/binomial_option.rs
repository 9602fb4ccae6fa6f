//! # Binomial option
//!
//! $$
//! V^{(N)}=\max\big(0,\pm(S^{(N)}-K)\big),\qquad
//! V^{(i)}=\max\big(C^{(i)},\pm(S^{(i)}-K)\big)\ \text{(American)}
//! $$
//!
use ndarray::Array1;
use ndarray::Zip;

use crate::error::LatticeError;
use crate::error::Result;
use crate::quant::lattice::BackwardPayoff;
use crate::quant::lattice::Lattice;
use crate::quant::lattice::LatticeConfig;
use crate::quant::lattice::RecombiningTree;
use crate::quant::lattice::StepParameters;
use crate::quant::lattice::Valuation;
use crate::quant::OptionStyle;
use crate::quant::OptionType;
use crate::traits::PricerExt;

/// Vanilla call/put payoff with optional early exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaPayoff {
  pub strike: f64,
  pub option_type: OptionType,
  pub style: OptionStyle,
}

impl VanillaPayoff {
  fn intrinsic(&self, s: f64) -> f64 {
    match self.option_type {
      OptionType::Call => s - self.strike,
      OptionType::Put => self.strike - s,
    }
  }
}

impl BackwardPayoff for VanillaPayoff {
  fn terminal(&self, prices: &Array1<f64>) -> Array1<f64> {
    prices.mapv(|s| self.intrinsic(s).max(0.0))
  }

  fn exercise(&self, mut continuation: Array1<f64>, prices: &Array1<f64>) -> Array1<f64> {
    match self.style {
      OptionStyle::European => continuation,
      OptionStyle::American => {
        Zip::from(&mut continuation)
          .and(prices)
          .for_each(|c, &s| *c = c.max(self.intrinsic(s)));
        continuation
      }
    }
  }
}

/// European or American option priced on a binomial lattice.
#[derive(Debug, Clone)]
pub struct BinomialOption {
  lattice: Lattice,
  payoff: VanillaPayoff,
  valuation: Option<Valuation>,
}

impl BinomialOption {
  /// The config must carry a strike.
  pub fn new(config: LatticeConfig, option_type: OptionType, style: OptionStyle) -> Result<Self> {
    let strike = config
      .strike()
      .ok_or_else(|| LatticeError::MissingParameter("an option needs a strike".into()))?;

    Ok(Self {
      lattice: Lattice::new(config),
      payoff: VanillaPayoff {
        strike,
        option_type,
        style,
      },
      valuation: None,
    })
  }

  pub fn config(&self) -> &LatticeConfig {
    self.lattice.config()
  }

  pub fn strike(&self) -> f64 {
    self.payoff.strike
  }

  pub fn option_type(&self) -> OptionType {
    self.payoff.option_type
  }

  pub fn style(&self) -> OptionStyle {
    self.payoff.style
  }

  /// Moves `(u, d)` and, for Leisen-Reimer, the targeted `(qu, qd)`.
  pub fn step_parameters(&self) -> Option<&StepParameters> {
    self.config().step_parameters()
  }

  /// Option value at every node of the last run.
  pub fn payoff_tree(&self) -> Option<&RecombiningTree> {
    self.valuation.as_ref().map(|valuation| &valuation.value_tree)
  }
}

impl PricerExt for BinomialOption {
  fn calculate_price(&mut self) -> f64 {
    let valuation = Valuation::run(&self.lattice, &self.payoff);
    let premium = valuation.premium;
    self.valuation = Some(valuation);
    premium
  }

  fn valuation(&self) -> Option<&Valuation> {
    self.valuation.as_ref()
  }
}
