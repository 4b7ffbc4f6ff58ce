pub mod builders;
pub mod config;
pub mod error;
pub mod math;
pub mod operations;
pub mod store;
pub mod units;
pub mod wires;

pub use error::{PdvdError, Result};
