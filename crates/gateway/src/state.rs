//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::repository::UserRepository;
use user_service_lib::service::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Probed by the health endpoint
    pub store: Arc<dyn UserRepository>,
}

impl AppState {
    /// Create new app state.
    pub fn new(user_service: Arc<dyn UserService>, store: Arc<dyn UserRepository>) -> Self {
        Self {
            user_service,
            store,
        }
    }
}
