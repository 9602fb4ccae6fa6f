//! # Lattice configuration
//!
//! All invariants are checked once, in [`LatticeConfigBuilder::build`]; a built
//! [`LatticeConfig`] is immutable.
//!
use std::fmt::Display;
use std::str::FromStr;

use ndarray::Array1;
use tracing::debug;

use super::strategy::Direct;
use super::strategy::ParameterStrategy;
use super::strategy::StepParameters;
use super::strategy::StrategyInputs;
use super::tree::RecombiningTree;
use crate::error::LatticeError;
use crate::error::Result;

/// How the price tree is obtained.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TreeMethod {
  /// Moves are factors: $S u$, $S d$.
  #[default]
  Multiplicative,
  /// Moves are increments: $S + u$, $S - d$.
  Additive,
  /// The tree is supplied by the caller.
  Direct,
}

impl Display for TreeMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      TreeMethod::Multiplicative => write!(f, "multiply"),
      TreeMethod::Additive => write!(f, "add"),
      TreeMethod::Direct => write!(f, "direct"),
    }
  }
}

impl FromStr for TreeMethod {
  type Err = LatticeError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "multiply" => Ok(TreeMethod::Multiplicative),
      "add" => Ok(TreeMethod::Additive),
      "direct" => Ok(TreeMethod::Direct),
      other => Err(LatticeError::UnknownTreeMethod(other.to_string())),
    }
  }
}

/// Interest rate structure driving growth and discount factors.
#[derive(Debug, Clone, PartialEq)]
pub enum RateSpec {
  /// One continuously compounded rate for every node.
  Flat(f64),
  /// One rate per node, for levels `0..steps`.
  Tree(RecombiningTree),
}

/// Where the price tree comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeSource {
  /// Built from the root with the resolved moves.
  Synthetic(StepParameters),
  /// Supplied by the caller.
  Supplied(RecombiningTree),
}

/// Validated lattice inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeConfig {
  spot: f64,
  strike: Option<f64>,
  maturity: f64,
  steps: usize,
  tree_method: TreeMethod,
  source: TreeSource,
  rates: RateSpec,
  volatility: f64,
  dividend_yield: f64,
  strategy: &'static str,
}

impl LatticeConfig {
  pub fn builder() -> LatticeConfigBuilder {
    LatticeConfigBuilder::default()
  }

  /// Underlying price at the root.
  pub fn spot(&self) -> f64 {
    self.spot
  }

  pub fn strike(&self) -> Option<f64> {
    self.strike
  }

  /// Time to maturity in years.
  pub fn maturity(&self) -> f64 {
    self.maturity
  }

  pub fn steps(&self) -> usize {
    self.steps
  }

  /// Uniform time increment, `maturity / steps`.
  pub fn dt(&self) -> f64 {
    self.maturity / self.steps as f64
  }

  pub fn tree_method(&self) -> TreeMethod {
    self.tree_method
  }

  pub fn source(&self) -> &TreeSource {
    &self.source
  }

  /// Moves resolved by the strategy; `None` when the tree was supplied.
  pub fn step_parameters(&self) -> Option<&StepParameters> {
    match &self.source {
      TreeSource::Synthetic(params) => Some(params),
      TreeSource::Supplied(_) => None,
    }
  }

  pub fn rates(&self) -> &RateSpec {
    &self.rates
  }

  pub fn volatility(&self) -> f64 {
    self.volatility
  }

  pub fn dividend_yield(&self) -> f64 {
    self.dividend_yield
  }

  /// Caller-supplied price tree, if any.
  pub fn price_tree(&self) -> Option<&RecombiningTree> {
    match &self.source {
      TreeSource::Supplied(tree) => Some(tree),
      TreeSource::Synthetic(_) => None,
    }
  }

  /// Name of the strategy that produced the moves.
  pub fn strategy(&self) -> &'static str {
    self.strategy
  }
}

/// Builder for [`LatticeConfig`].
#[derive(Debug)]
pub struct LatticeConfigBuilder {
  spot: Option<f64>,
  strike: Option<f64>,
  maturity: f64,
  steps: Option<usize>,
  probabilities: Option<(f64, f64)>,
  price_changes: Option<(f64, f64)>,
  tree_method: TreeMethod,
  flat_rate: Option<f64>,
  rate_tree: Option<Vec<Array1<f64>>>,
  price_tree: Option<Vec<Array1<f64>>>,
  volatility: f64,
  dividend_yield: f64,
  strategy: Box<dyn ParameterStrategy>,
}

impl Default for LatticeConfigBuilder {
  fn default() -> Self {
    Self {
      spot: None,
      strike: None,
      maturity: 1.0,
      steps: None,
      probabilities: None,
      price_changes: None,
      tree_method: TreeMethod::default(),
      flat_rate: None,
      rate_tree: None,
      price_tree: None,
      volatility: 0.0,
      dividend_yield: 0.0,
      strategy: Box::new(Direct),
    }
  }
}

impl LatticeConfigBuilder {
  pub fn spot(mut self, spot: f64) -> Self {
    self.spot = Some(spot);
    self
  }
  pub fn strike(mut self, strike: f64) -> Self {
    self.strike = Some(strike);
    self
  }
  pub fn maturity(mut self, maturity: f64) -> Self {
    self.maturity = maturity;
    self
  }
  pub fn steps(mut self, steps: usize) -> Self {
    self.steps = Some(steps);
    self
  }
  /// Relative moves: `u = 1 + pu`, `d = 1 - pd`.
  pub fn probabilities(mut self, pu: f64, pd: f64) -> Self {
    self.probabilities = Some((pu, pd));
    self
  }
  /// Factors or increments, depending on the tree method.
  pub fn price_changes(mut self, u: f64, d: f64) -> Self {
    self.price_changes = Some((u, d));
    self
  }
  pub fn tree_method(mut self, tree_method: TreeMethod) -> Self {
    self.tree_method = tree_method;
    self
  }
  pub fn flat_rate(mut self, rate: f64) -> Self {
    self.flat_rate = Some(rate);
    self
  }
  pub fn rate_tree<L: Into<Vec<f64>>>(mut self, levels: Vec<L>) -> Self {
    self.rate_tree = Some(into_levels(levels));
    self
  }
  pub fn price_tree<L: Into<Vec<f64>>>(mut self, levels: Vec<L>) -> Self {
    self.price_tree = Some(into_levels(levels));
    self
  }
  /// Reuse an already validated tree, e.g. one produced by another lattice.
  pub fn with_price_tree(mut self, tree: RecombiningTree) -> Self {
    self.price_tree = Some(tree.levels().to_vec());
    self
  }
  pub fn volatility(mut self, volatility: f64) -> Self {
    self.volatility = volatility;
    self
  }
  pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
    self.dividend_yield = dividend_yield;
    self
  }
  pub fn strategy<S: ParameterStrategy + 'static>(mut self, strategy: S) -> Self {
    self.strategy = Box::new(strategy);
    self
  }

  /// Validate every input and resolve the moves.
  pub fn build(self) -> Result<LatticeConfig> {
    if !(self.maturity > 0.0) {
      return Err(LatticeError::OutOfRange(
        "maturity time has to be larger than zero".into(),
      ));
    }
    if let Some((pu, pd)) = self.probabilities {
      if !(0.0..=1.0).contains(&pu) || !(0.0..=1.0).contains(&pd) {
        return Err(LatticeError::OutOfRange(
          "probabilities have to lie in the range from 0 to 1".into(),
        ));
      }
    }
    if let Some((u, d)) = self.price_changes {
      if !(u >= 0.0 && d >= 0.0) {
        return Err(LatticeError::OutOfRange(
          "factors and summands have to be non-negative".into(),
        ));
      }
    }
    if !(self.volatility >= 0.0) {
      return Err(LatticeError::OutOfRange(
        "volatility has to be non-negative".into(),
      ));
    }

    let (spot, steps, tree_method, source, strategy) =
      match self.price_tree {
        Some(levels) => {
          let tree = RecombiningTree::new(levels)?;
          if tree.steps() == 0 {
            return Err(LatticeError::Structural(
              "the price tree needs at least two levels".into(),
            ));
          }
          debug!(
            steps = tree.steps(),
            requested = %self.tree_method,
            "price tree supplied, switching to direct mode"
          );
          (
            tree.root(),
            tree.steps(),
            TreeMethod::Direct,
            TreeSource::Supplied(tree),
            "supplied",
          )
        }
        None => {
          if self.tree_method == TreeMethod::Direct {
            return Err(LatticeError::ModeConsistency(
              "your tree method is 'direct', but you have not provided a price tree".into(),
            ));
          }
          let (Some(spot), Some(steps)) = (self.spot, self.steps) else {
            return Err(LatticeError::MissingParameter(
              "if no price tree is provided, spot and steps must be specified, along with \
               probabilities or price changes"
                .into(),
            ));
          };
          if steps == 0 {
            return Err(LatticeError::OutOfRange(
              "steps has to be at least one".into(),
            ));
          }

          let inputs = StrategyInputs {
            spot,
            strike: self.strike,
            maturity: self.maturity,
            steps,
            flat_rate: self.flat_rate,
            dividend_yield: self.dividend_yield,
            volatility: self.volatility,
            probabilities: self.probabilities,
            price_changes: self.price_changes,
          };
          let params = self.strategy.step_parameters(&inputs)?;
          debug!(
            strategy = self.strategy.name(),
            steps,
            u = params.u,
            d = params.d,
            "resolved step parameters"
          );
          (
            spot,
            steps,
            self.tree_method,
            TreeSource::Synthetic(params),
            self.strategy.name(),
          )
        }
      };

    let rates = match (self.rate_tree, self.flat_rate) {
      (Some(levels), _) => {
        let tree = RecombiningTree::new(levels)?;
        if tree.depth() < steps {
          return Err(LatticeError::Structural(format!(
            "the rate tree must have at least as many levels as steps ({} < {steps})",
            tree.depth()
          )));
        }
        RateSpec::Tree(tree.truncated(steps))
      }
      (None, Some(rate)) => RateSpec::Flat(rate),
      (None, None) => {
        return Err(LatticeError::MissingParameter(
          "if no rate tree is provided, a flat rate has to be specified".into(),
        ))
      }
    };

    Ok(LatticeConfig {
      spot,
      strike: self.strike,
      maturity: self.maturity,
      steps,
      tree_method,
      source,
      rates,
      volatility: self.volatility,
      dividend_yield: self.dividend_yield,
      strategy,
    })
  }
}

fn into_levels<L: Into<Vec<f64>>>(levels: Vec<L>) -> Vec<Array1<f64>> {
  levels
    .into_iter()
    .map(|level| Array1::from(level.into()))
    .collect()
}
