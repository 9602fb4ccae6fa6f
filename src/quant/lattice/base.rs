//! # Lattice base
//!
//! $$
//! S^{(0)}=[S_0],\qquad
//! S^{(i+1)}=\big[S^{(i)}_0u,\dots,S^{(i)}_iu,\;S^{(i)}_id\big]
//! $$
//! (additive trees use $+u$ and $-d$), and per node
//! $$
//! R^{(i)}_j=e^{(r^{(i)}_j-q)\Delta t},\qquad D^{(i)}_j=1/R^{(i)}_j .
//! $$
//!
use ndarray::Array1;
use tracing::trace;

use super::config::LatticeConfig;
use super::config::RateSpec;
use super::config::TreeMethod;
use super::config::TreeSource;
use super::tree::RecombiningTree;

/// Growth and discount factors over one time increment, for levels `0..steps`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestFactors {
  /// $e^{(r-q)\Delta t}$ per node.
  pub growth: Vec<Array1<f64>>,
  /// Reciprocal of `growth`.
  pub discounts: Vec<Array1<f64>>,
}

/// Builds the trees every instrument prices on.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
  config: LatticeConfig,
}

impl Lattice {
  pub fn new(config: LatticeConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &LatticeConfig {
    &self.config
  }

  /// Price tree: the supplied one, or one grown from the spot with the resolved moves.
  pub fn build_price_tree(&self) -> RecombiningTree {
    let params = match self.config.source() {
      TreeSource::Supplied(tree) => return tree.clone(),
      TreeSource::Synthetic(params) => params,
    };
    let (u, d) = (params.u, params.d);
    let steps = self.config.steps();

    let mut levels: Vec<Array1<f64>> = Vec::with_capacity(steps + 1);
    levels.push(Array1::from_elem(1, self.config.spot()));
    for i in 0..steps {
      let prev = &levels[i];
      let last = prev[i];
      let next = match self.config.tree_method() {
        TreeMethod::Additive => prev
          .iter()
          .map(|s| s + u)
          .chain(std::iter::once(last - d))
          .collect::<Array1<f64>>(),
        // synthetic sources never carry the direct method
        TreeMethod::Multiplicative | TreeMethod::Direct => prev
          .iter()
          .map(|s| s * u)
          .chain(std::iter::once(last * d))
          .collect::<Array1<f64>>(),
      };
      trace!(level = i + 1, nodes = next.len(), "price level");
      levels.push(next);
    }

    RecombiningTree::from_levels(levels)
  }

  /// Growth and discount factors from the flat rate or the rate tree, net of dividend yield.
  pub fn build_interest_factors(&self) -> InterestFactors {
    let dt = self.config.dt();
    let q = self.config.dividend_yield();

    let growth = match self.config.rates() {
      RateSpec::Flat(r) => {
        let factor = ((r - q) * dt).exp();
        (1..=self.config.steps())
          .map(|nodes| Array1::from_elem(nodes, factor))
          .collect::<Vec<_>>()
      }
      RateSpec::Tree(tree) => tree
        .iter()
        .map(|level| level.mapv(|r| ((r - q) * dt).exp()))
        .collect::<Vec<_>>(),
    };
    let discounts = growth.iter().map(|level| level.mapv(|g| 1.0 / g)).collect();

    InterestFactors { growth, discounts }
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;
  use crate::quant::lattice::strategy::Crr;

  #[test]
  fn multiplicative_tree() {
    let lattice = Lattice::new(
      LatticeConfig::builder()
        .spot(50.0)
        .steps(2)
        .probabilities(0.2, 0.2)
        .flat_rate(0.05)
        .build()
        .unwrap(),
    );
    let tree = lattice.build_price_tree();

    assert_eq!(tree.depth(), 3);
    assert_abs_diff_eq!(tree[1], array![60.0, 40.0], epsilon = 1e-12);
    assert_abs_diff_eq!(tree[2], array![72.0, 48.0, 32.0], epsilon = 1e-12);
  }

  #[test]
  fn additive_tree() {
    let lattice = Lattice::new(
      LatticeConfig::builder()
        .spot(100.0)
        .steps(4)
        .price_changes(2.0, 1.0)
        .tree_method(TreeMethod::Additive)
        .flat_rate(0.05)
        .build()
        .unwrap(),
    );

    assert_eq!(
      lattice.build_price_tree().to_nested(),
      vec![
        vec![100.0],
        vec![102.0, 99.0],
        vec![104.0, 101.0, 98.0],
        vec![106.0, 103.0, 100.0, 97.0],
        vec![108.0, 105.0, 102.0, 99.0, 96.0],
      ]
    );
  }

  #[test]
  fn crr_tree_recombines() {
    let lattice = Lattice::new(
      LatticeConfig::builder()
        .spot(50.0)
        .steps(6)
        .volatility(0.3)
        .strategy(Crr)
        .flat_rate(0.05)
        .build()
        .unwrap(),
    );
    let tree = lattice.build_price_tree();

    for (i, level) in tree.iter().enumerate() {
      assert_eq!(level.len(), i + 1);
    }
    // up then down lands back on the spot
    assert_relative_eq!(tree[2][1], 50.0, epsilon = 1e-12);
    assert_relative_eq!(tree[4][2], 50.0, epsilon = 1e-12);
  }

  #[test]
  fn supplied_tree_is_returned_as_is() {
    let levels = vec![vec![100.0], vec![115.0, 87.0]];
    let lattice = Lattice::new(
      LatticeConfig::builder()
        .price_tree(levels.clone())
        .flat_rate(0.0)
        .build()
        .unwrap(),
    );

    assert_eq!(lattice.build_price_tree().to_nested(), levels);
  }

  #[test]
  fn flat_rate_factors() {
    let lattice = Lattice::new(
      LatticeConfig::builder()
        .spot(50.0)
        .steps(4)
        .maturity(2.0)
        .probabilities(0.2, 0.2)
        .flat_rate(0.05)
        .dividend_yield(0.01)
        .build()
        .unwrap(),
    );
    let factors = lattice.build_interest_factors();
    let growth = ((0.05f64 - 0.01) * 0.5).exp();

    assert_eq!(factors.growth.len(), 4);
    for (i, (g, d)) in factors.growth.iter().zip(&factors.discounts).enumerate() {
      assert_eq!(g.len(), i + 1);
      assert_relative_eq!(g[0], growth, epsilon = 1e-15);
      assert_relative_eq!(d[i], 1.0 / growth, epsilon = 1e-15);
    }
  }

  #[test]
  fn rate_tree_factors() {
    let lattice = Lattice::new(
      LatticeConfig::builder()
        .price_tree(vec![vec![100.0], vec![115.0, 87.0], vec![133.0, 100.0, 75.0]])
        .rate_tree(vec![vec![0.02], vec![0.01, 0.03], vec![0.0, 0.0, 0.0]])
        .maturity(2.0)
        .build()
        .unwrap(),
    );
    let factors = lattice.build_interest_factors();

    assert_eq!(factors.growth.len(), 2);
    assert_relative_eq!(factors.growth[0][0], 0.02f64.exp(), epsilon = 1e-15);
    assert_relative_eq!(factors.growth[1][1], 0.03f64.exp(), epsilon = 1e-15);
    assert_relative_eq!(factors.discounts[1][0], (-0.01f64).exp(), epsilon = 1e-15);
  }
}
