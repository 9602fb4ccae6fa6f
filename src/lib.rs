//! # lattice-rs
//!
//! Fair values, risk-neutral probabilities and hedge ratios of European and
//! American options and of futures, on recombining binomial lattices.
//!
//! ```ignore
//! use lattice_rs::quant::lattice::{Crr, LatticeConfig};
//! use lattice_rs::quant::pricing::binomial_option::BinomialOption;
//! use lattice_rs::quant::{OptionStyle, OptionType};
//! use lattice_rs::traits::PricerExt;
//!
//! let config = LatticeConfig::builder()
//!   .spot(50.0)
//!   .strike(52.0)
//!   .maturity(2.0)
//!   .steps(2)
//!   .flat_rate(0.05)
//!   .volatility(0.3)
//!   .strategy(Crr)
//!   .build()?;
//! let mut put = BinomialOption::new(config, OptionType::Put, OptionStyle::European)?;
//! let premium = put.calculate_price();
//! ```
//!
pub mod error;
pub mod quant;
pub mod traits;

pub use error::LatticeError;
