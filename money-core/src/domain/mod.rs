//! Domain models for money values.

mod math;
pub mod money;

pub use money::{Money, MoneyFields};
