//! Domain types for TickerLab

pub mod period;
pub mod price;

pub use period::{Interval, Period};
pub use price::{PriceRecord, PriceTable};
