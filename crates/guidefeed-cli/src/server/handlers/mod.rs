//! API request handlers.

mod health;
mod reports;

pub use health::*;
pub use reports::*;
