//! Transfer market: valuation and player moves.

pub mod market;
pub mod valuation;

pub use market::TransferMarket;
pub use valuation::{age_factor, calculate_value};
