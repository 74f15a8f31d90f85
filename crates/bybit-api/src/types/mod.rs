//! Data types and models for Bybit API requests and responses.

mod common;
mod contract;
mod spot;
mod v5;

pub use common::*;
pub use contract::*;
pub use spot::*;
pub use v5::*;
