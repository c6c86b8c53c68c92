use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::repository::{
    AdminRepository, EventRepository, PgAdminRepository, PgEventRepository,
};
use crate::services::{AuthService, EventService};
use crate::utils::jwt::TokenService;

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
    pub auth: AuthService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(
        events: Arc<dyn EventRepository>,
        admins: Arc<dyn AdminRepository>,
        tokens: TokenService,
    ) -> Self {
        Self {
            events: EventService::new(events),
            auth: AuthService::new(admins, tokens.clone()),
            tokens,
        }
    }

    pub fn from_pool(pool: PgPool, config: &Config) -> Self {
        Self::new(
            Arc::new(PgEventRepository::new(pool.clone())),
            Arc::new(PgAdminRepository::new(pool)),
            TokenService::new(&config.jwt_secret, config.jwt_expires_in),
        )
    }
}
