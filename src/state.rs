//! Shared application state for all routes.

use crate::config::Profile;
use crate::store::PizzaStore;

#[derive(Clone)]
pub struct AppState {
    pub store: PizzaStore,
    /// Environment details are only exposed on the index page outside production.
    pub profile: Profile,
}
