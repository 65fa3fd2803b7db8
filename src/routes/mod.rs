//! Route builders, one module per surface.

pub mod common;
pub mod pizza;

pub use common::common_routes;
pub use pizza::pizza_routes;
