//! Port traits (interfaces for host adapters).
//!
//! The registry depends on these traits, not on how the host persists state.

mod store;

pub use store::{CallbackStore, CurrentCurrencyStore, NoopStore};
