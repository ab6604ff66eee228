//! Business logic services

pub mod catalog;
pub mod users;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::CatalogStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>, auth_config: AuthConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            users: users::UsersService::new(store, auth_config),
        }
    }
}
