//! Pizza catalogue REST service: SQLite-backed CRUD plus zone record tooling.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod schema;
pub mod state;
pub mod store;
pub mod zone;

pub use app::build_app;
pub use config::{Config, Profile};
pub use error::{AppError, ConfigError};
pub use routes::{common_routes, pizza_routes};
pub use state::AppState;
pub use store::{connect, Pizza, PizzaStore};
