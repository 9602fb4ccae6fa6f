//! # Hedge ratios
//!
//! $$
//! \Delta^{(i)}_j=\frac{V^{(i)}_{j+1}-V^{(i)}_j}{S^{(i)}_{j+1}-S^{(i)}_j},\qquad i=1,\dots,N
//! $$
//!
use ndarray::s;
use ndarray::Array1;

use super::tree::RecombiningTree;

/// Hedge ratios between adjacent nodes, for levels `1..=steps`.
///
/// Level `i` yields `i` ratios. Nodes with equal prices give non-finite ratios.
pub fn hedge_ratios(values: &RecombiningTree, prices: &RecombiningTree) -> Vec<Array1<f64>> {
  (1..values.depth())
    .map(|i| {
      let dv = &values[i].slice(s![1..]) - &values[i].slice(s![..-1]);
      let ds = &prices[i].slice(s![1..]) - &prices[i].slice(s![..-1]);
      dv / ds
    })
    .collect()
}
