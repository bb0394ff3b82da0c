use std::sync::Arc;

use anyhow::Context;
use schoolhub_config::{AppConfig, CorsConfig, JwtConfig, PasswordConfig};
use schoolhub_db::{PgPool, init_db_pool};
use tracing::{info, warn};

use crate::modules::classes::repository::{
    ClassRepository, InMemoryClassRepository, PgClassRepository,
};
use crate::modules::classes::service::ClassService;
use crate::modules::communication::repository::{
    InMemoryMessageRepository, MessageRepository, PgMessageRepository,
};
use crate::modules::communication::service::CommunicationService;
use crate::modules::users::repository::{
    InMemoryUserRepository, PgUserRepository, UserRepository,
};
use crate::modules::users::service::UserService;

/// The store behind every service.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            classes: Arc::new(PgClassRepository::new(pool.clone())),
            messages: Arc::new(PgMessageRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            classes: Arc::new(InMemoryClassRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub classes: ClassService,
    pub communication: CommunicationService,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        stores: Stores,
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let classes = ClassService::new(stores.classes);

        Self {
            users: UserService::new(stores.users, jwt_config.clone(), password_config),
            communication: CommunicationService::new(stores.messages, classes.clone()),
            classes,
            jwt_config,
            cors_config,
        }
    }
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

/// Connects the configured stores and builds the shared state.
///
/// Without `DATABASE_URL` the server runs on in-memory stores, which lose
/// everything on restart.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let stores = match &config.database.url {
        Some(url) => {
            let pool = init_db_pool(url, config.database.max_connections)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool).await?;
            info!("Using PostgreSQL stores");
            Stores::postgres(pool)
        }
        None => {
            warn!("DATABASE_URL is not set; using in-memory stores");
            Stores::in_memory()
        }
    };

    Ok(AppState::new(
        stores,
        config.jwt.clone(),
        config.password,
        config.cors.clone(),
    ))
}
