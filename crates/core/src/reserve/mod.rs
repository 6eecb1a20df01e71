//! Reserve study items and funding math.

pub mod error;
pub mod types;

pub use error::ReserveError;
pub use types::ReserveItem;
