//! # Binomial lattice
//!
//! $$
//! V_0=\sum_{\text{paths}}\prod_i D^{(i)}q^{(i)}\,g\big(S^{(N)}\big)
//! \quad\text{evaluated level by level from }N\text{ down to }0
//! $$
//!
//! A [`Lattice`] turns a validated [`LatticeConfig`] into a price tree and
//! interest factors; [`Valuation::run`] derives the risk-neutral probabilities
//! and rolls an instrument's payoff back to the root.
//!
pub mod backward;
pub mod base;
pub mod config;
pub mod hedge;
pub mod risk_neutral;
pub mod strategy;
pub mod tree;
mod valuation;

pub use backward::BackwardPayoff;
pub use base::InterestFactors;
pub use base::Lattice;
pub use config::LatticeConfig;
pub use config::LatticeConfigBuilder;
pub use config::RateSpec;
pub use config::TreeMethod;
pub use config::TreeSource;
pub use risk_neutral::RiskNeutralProbabilities;
pub use strategy::Crr;
pub use strategy::Direct;
pub use strategy::LeisenReimer;
pub use strategy::ParameterStrategy;
pub use strategy::StepParameters;
pub use tree::RecombiningTree;
pub use valuation::Valuation;
