//! # Quant
//!
//! $$
//! V_0=\mathbb E^{\mathbb Q}\!\left[\prod_{i<N}D^{(i)}\,\Pi\big(S^{(N)}\big)\right]
//! $$
//!
pub mod lattice;
pub mod pricing;

/// Option type.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionType {
  #[default]
  Call,
  Put,
}

/// Option style.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionStyle {
  American,
  #[default]
  European,
}
