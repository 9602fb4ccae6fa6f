//! # Parameter strategies
//!
//! A strategy turns the lattice inputs into the per-step moves $(u, d)$ and,
//! where it targets one, the probability pair $(q_u, q_d)$.
//!
//! Cox-Ross-Rubinstein:
//! $$
//! u=e^{\sigma\sqrt{\Delta t}},\qquad d=u^{-1}
//! $$
//!
//! Leisen-Reimer, with $h$ the Peizer-Pratt inversion over the step count $n$
//! rounded up to odd:
//! $$
//! p=h(d_2),\quad \bar p=h(d_1),\quad
//! u=e^{(r-q)\Delta t}\,\frac{\bar p}{p},\quad
//! d=\frac{e^{(r-q)\Delta t}-pu}{1-p}
//! $$
//!
use std::fmt::Debug;

use crate::error::LatticeError;
use crate::error::Result;

/// Inputs a strategy may draw on, after the step count has been resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyInputs {
  pub spot: f64,
  pub strike: Option<f64>,
  pub maturity: f64,
  pub steps: usize,
  pub flat_rate: Option<f64>,
  pub dividend_yield: f64,
  pub volatility: f64,
  /// Relative moves `(pu, pd)` as given by the caller.
  pub probabilities: Option<(f64, f64)>,
  /// Multiplicative factors or additive increments `(u, d)` as given by the caller.
  pub price_changes: Option<(f64, f64)>,
}

impl StrategyInputs {
  /// Uniform time increment.
  pub fn dt(&self) -> f64 {
    self.maturity / self.steps as f64
  }
}

/// Per-step moves used to build the price tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParameters {
  /// Up move (factor or increment).
  pub u: f64,
  /// Down move (factor or increment).
  pub d: f64,
  /// Targeted up probability, when the strategy has one.
  pub qu: Option<f64>,
  /// Targeted down probability, when the strategy has one.
  pub qd: Option<f64>,
}

/// Produces the moves of a synthetic tree from the lattice inputs.
pub trait ParameterStrategy: Debug + Send + Sync {
  /// Short name used in logs and error messages.
  fn name(&self) -> &'static str;

  /// Compute the moves.
  fn step_parameters(&self, inputs: &StrategyInputs) -> Result<StepParameters>;
}

/// Moves supplied by the caller, either as relative moves or as explicit changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Direct;

impl ParameterStrategy for Direct {
  fn name(&self) -> &'static str {
    "direct"
  }

  fn step_parameters(&self, inputs: &StrategyInputs) -> Result<StepParameters> {
    match (inputs.probabilities, inputs.price_changes) {
      (Some(_), Some(_)) => Err(LatticeError::MutuallyExclusive(
        "you can specify either probabilities or price changes, not both".into(),
      )),
      (None, None) => Err(LatticeError::MissingParameter(
        "if no price tree is provided, spot and steps must be specified, along with \
         probabilities or price changes"
          .into(),
      )),
      (Some((pu, pd)), None) => {
        if pu == 0.0 && pd == 0.0 {
          return Err(LatticeError::Degenerate(
            "when you specify probabilities, they cannot both be zero".into(),
          ));
        }
        Ok(StepParameters {
          u: 1.0 + pu,
          d: 1.0 - pd,
          qu: None,
          qd: None,
        })
      }
      (None, Some((u, d))) => {
        if u == 0.0 && d == 0.0 {
          return Err(LatticeError::Degenerate(
            "when you specify price changes, they cannot both be zero".into(),
          ));
        }
        Ok(StepParameters {
          u,
          d,
          qu: None,
          qd: None,
        })
      }
    }
  }
}

/// Cox-Ross-Rubinstein moves from volatility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crr;

impl ParameterStrategy for Crr {
  fn name(&self) -> &'static str {
    "crr"
  }

  fn step_parameters(&self, inputs: &StrategyInputs) -> Result<StepParameters> {
    reject_explicit_moves(self.name(), inputs)?;
    require_volatility(self.name(), inputs)?;

    let u = (inputs.volatility * inputs.dt().sqrt()).exp();
    Ok(StepParameters {
      u,
      d: 1.0 / u,
      qu: None,
      qd: None,
    })
  }
}

/// Leisen-Reimer moves targeting the Peizer-Pratt probabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeisenReimer;

impl LeisenReimer {
  /// Odd step count fed to the Peizer-Pratt inversion; the lattice keeps the requested count.
  pub fn inversion_steps(requested: usize) -> usize {
    if requested % 2 == 0 {
      requested + 1
    } else {
      requested
    }
  }
}

impl ParameterStrategy for LeisenReimer {
  fn name(&self) -> &'static str {
    "leisen-reimer"
  }

  fn step_parameters(&self, inputs: &StrategyInputs) -> Result<StepParameters> {
    reject_explicit_moves(self.name(), inputs)?;
    require_volatility(self.name(), inputs)?;

    let strike = inputs.strike.ok_or_else(|| {
      LatticeError::MissingParameter("the leisen-reimer tree needs a strike".into())
    })?;
    let r = inputs.flat_rate.ok_or_else(|| {
      LatticeError::MissingParameter("the leisen-reimer tree needs a flat interest rate".into())
    })?;
    if inputs.spot <= 0.0 || strike <= 0.0 {
      return Err(LatticeError::OutOfRange(
        "the leisen-reimer tree needs a positive spot and strike".into(),
      ));
    }

    let n = Self::inversion_steps(inputs.steps);
    let q = inputs.dividend_yield;
    let v = inputs.volatility;
    let tau = inputs.maturity;
    let dt = inputs.dt();

    let growth = ((r - q) * dt).exp();
    let d1 = ((inputs.spot / strike).ln() + (r - q + 0.5 * v.powi(2)) * tau) / (v * tau.sqrt());
    let d2 = d1 - v * tau.sqrt();

    let p_bar = peizer_pratt(d1, n);
    let p = peizer_pratt(d2, n);
    let u = growth * p_bar / p;
    let d = (growth - p * u) / (1.0 - p);

    Ok(StepParameters {
      u,
      d,
      qu: Some(p),
      qd: Some(1.0 - p),
    })
  }
}

/// Peizer-Pratt method 2 inversion of a standard normal quantile `z` into a
/// binomial success probability over `n` steps.
pub fn peizer_pratt(z: f64, n: usize) -> f64 {
  let n = n as f64;
  let exponent = -(z / (n + 1.0 / 3.0 + 0.1 / (n + 1.0))).powi(2) * (n + 1.0 / 6.0);
  0.5 + 1f64.copysign(z) * (0.25 - 0.25 * exponent.exp()).sqrt()
}

fn reject_explicit_moves(name: &str, inputs: &StrategyInputs) -> Result<()> {
  if inputs.probabilities.is_some() || inputs.price_changes.is_some() {
    return Err(LatticeError::MutuallyExclusive(format!(
      "the {name} tree derives its moves from volatility; do not specify probabilities or \
       price changes"
    )));
  }
  Ok(())
}

fn require_volatility(name: &str, inputs: &StrategyInputs) -> Result<()> {
  if !(inputs.volatility > 0.0) {
    return Err(LatticeError::OutOfRange(format!(
      "the {name} tree needs a volatility larger than zero"
    )));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;

  use super::*;

  fn inputs() -> StrategyInputs {
    StrategyInputs {
      spot: 50.0,
      strike: Some(52.0),
      maturity: 2.0,
      steps: 2,
      flat_rate: Some(0.05),
      dividend_yield: 0.0,
      volatility: 0.3,
      probabilities: None,
      price_changes: None,
    }
  }

  #[test]
  fn direct_turns_probabilities_into_relative_moves() {
    let params = Direct
      .step_parameters(&StrategyInputs {
        probabilities: Some((0.2, 0.25)),
        ..inputs()
      })
      .unwrap();

    assert_relative_eq!(params.u, 1.2);
    assert_relative_eq!(params.d, 0.75);
    assert_eq!(params.qu, None);
  }

  #[test]
  fn direct_passes_price_changes_through() {
    let params = Direct
      .step_parameters(&StrategyInputs {
        price_changes: Some((2.0, 1.0)),
        ..inputs()
      })
      .unwrap();

    assert_eq!((params.u, params.d), (2.0, 1.0));
  }

  #[test]
  fn direct_needs_exactly_one_pair() {
    assert!(matches!(
      Direct.step_parameters(&inputs()),
      Err(LatticeError::MissingParameter(_))
    ));
    assert!(matches!(
      Direct.step_parameters(&StrategyInputs {
        probabilities: Some((0.5, 0.5)),
        price_changes: Some((1.0, 1.0)),
        ..inputs()
      }),
      Err(LatticeError::MutuallyExclusive(_))
    ));
  }

  #[test]
  fn direct_rejects_zero_pairs() {
    let zero_probs = StrategyInputs {
      probabilities: Some((0.0, 0.0)),
      ..inputs()
    };
    let zero_changes = StrategyInputs {
      price_changes: Some((0.0, 0.0)),
      ..inputs()
    };

    assert!(matches!(
      Direct.step_parameters(&zero_probs),
      Err(LatticeError::Degenerate(ref msg)) if msg.contains("probabilities")
    ));
    assert!(matches!(
      Direct.step_parameters(&zero_changes),
      Err(LatticeError::Degenerate(ref msg)) if msg.contains("price changes")
    ));
  }

  #[test]
  fn crr_moves_are_reciprocal() {
    let params = Crr.step_parameters(&inputs()).unwrap();

    assert_relative_eq!(params.u, 0.3f64.exp(), epsilon = 1e-15);
    assert_relative_eq!(params.u * params.d, 1.0, epsilon = 1e-15);
  }

  #[test]
  fn crr_rejects_explicit_moves_and_zero_volatility() {
    assert!(matches!(
      Crr.step_parameters(&StrategyInputs {
        probabilities: Some((0.5, 0.5)),
        ..inputs()
      }),
      Err(LatticeError::MutuallyExclusive(_))
    ));
    assert!(matches!(
      Crr.step_parameters(&StrategyInputs {
        volatility: 0.0,
        ..inputs()
      }),
      Err(LatticeError::OutOfRange(_))
    ));
  }

  #[test]
  fn leisen_reimer_inverts_over_odd_steps() {
    assert_eq!(LeisenReimer::inversion_steps(4), 5);
    assert_eq!(LeisenReimer::inversion_steps(5), 5);
  }

  #[test]
  fn leisen_reimer_keeps_requested_time_step() {
    let even = StrategyInputs {
      steps: 4,
      ..inputs()
    };
    let params = LeisenReimer.step_parameters(&even).unwrap();
    let p = params.qu.unwrap();
    let growth = (0.05 * even.dt()).exp();

    // same targeted probability as a five step inversion
    assert_abs_diff_eq!(p, 0.4853720643713192, epsilon = 1e-12);
    assert_abs_diff_eq!((growth - params.d) / (params.u - params.d), p, epsilon = 1e-12);
  }

  #[test]
  fn leisen_reimer_moves_match_targeted_probability() {
    let inputs = StrategyInputs {
      steps: 5,
      ..inputs()
    };
    let params = LeisenReimer.step_parameters(&inputs).unwrap();
    let p = params.qu.unwrap();
    let growth = (0.05 * inputs.dt()).exp();

    assert_abs_diff_eq!(p, 0.4853720643713192, epsilon = 1e-12);
    assert_abs_diff_eq!(params.qd.unwrap(), 1.0 - p, epsilon = 1e-15);
    assert_abs_diff_eq!((growth - params.d) / (params.u - params.d), p, epsilon = 1e-12);
  }

  #[test]
  fn leisen_reimer_needs_strike_and_flat_rate() {
    assert!(matches!(
      LeisenReimer.step_parameters(&StrategyInputs {
        strike: None,
        ..inputs()
      }),
      Err(LatticeError::MissingParameter(ref msg)) if msg.contains("strike")
    ));
    assert!(matches!(
      LeisenReimer.step_parameters(&StrategyInputs {
        flat_rate: None,
        ..inputs()
      }),
      Err(LatticeError::MissingParameter(ref msg)) if msg.contains("rate")
    ));
  }

  #[test]
  fn peizer_pratt_is_symmetric_around_one_half() {
    assert_eq!(peizer_pratt(0.0, 101), 0.5);
    for z in [-2.0, -0.3, 0.7, 1.9] {
      assert_abs_diff_eq!(peizer_pratt(z, 51) + peizer_pratt(-z, 51), 1.0, epsilon = 1e-15);
    }
    assert!(peizer_pratt(1.0, 51) > 0.5);
  }
}
