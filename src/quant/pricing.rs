//! # Pricing
//!
//! $$
//! V^{(i)}=h_i\!\left(D^{(i)}\big(qV^{(i+1)}_{\uparrow}+(1-q)V^{(i+1)}_{\downarrow}\big)\right)
//! $$
//!
pub mod binomial_futures;
pub mod binomial_option;
