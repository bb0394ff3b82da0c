use std::sync::Arc;

use anyhow::Context;
use schoolhub_auth::create_access_token;
use schoolhub_config::{JwtConfig, PasswordConfig};
use schoolhub_core::{hash_password, verify_password};
use schoolhub_models::{
    LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest, UpdateUserRequest, User,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::error::UserError;
use super::repository::{NewUser, UserRepository};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    jwt_config: JwtConfig,
    password_config: PasswordConfig,
}

fn parse_id(id: &str) -> Result<Uuid, UserError> {
    Uuid::parse_str(id.trim()).map_err(|_| UserError::InvalidId)
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
    ) -> Self {
        Self {
            repo,
            jwt_config,
            password_config,
        }
    }

    #[instrument(skip(self, dto), fields(username = %dto.username))]
    pub async fn create_user(&self, dto: RegisterRequest) -> Result<User, UserError> {
        if self.repo.find_by_username(&dto.username).await?.is_some() {
            return Err(UserError::UsernameTaken);
        }

        let password_hash = hash_password(&dto.password, self.password_config.bcrypt_cost)?;
        let subject = dto.subject.filter(|s| !s.is_empty());

        self.repo
            .insert(NewUser {
                username: dto.username,
                password_hash,
                role: dto.role,
                subject,
            })
            .await
    }

    /// Checks the credentials and issues an access token.
    ///
    /// An unknown username and a wrong password fail the same way.
    #[instrument(skip(self, dto), fields(username = %dto.username))]
    pub async fn login(&self, dto: LoginRequest) -> Result<LoginResponse, UserError> {
        let credentials = self
            .repo
            .find_by_username(&dto.username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&dto.password, &credentials.password_hash)? {
            debug!("Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let user = credentials.user;
        let token = create_access_token(user.id, &user.username, user.role, &self.jwt_config)
            .context("Failed to issue access token")?;

        Ok(LoginResponse { user, token })
    }

    #[instrument(skip(self, dto), fields(username = %dto.username))]
    pub async fn reset_password(&self, dto: ResetPasswordRequest) -> Result<(), UserError> {
        let password_hash = hash_password(&dto.new_password, self.password_config.bcrypt_cost)?;

        if !self.repo.set_password(&dto.username, &password_hash).await? {
            return Err(UserError::NotFound);
        }

        Ok(())
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, UserError> {
        self.repo.list().await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .repo
            .find_by_username(username)
            .await?
            .map(|credentials| credentials.user))
    }

    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: &str, patch: UpdateUserRequest) -> Result<User, UserError> {
        let id = parse_id(id)?;
        self.repo.update(id, patch).await?.ok_or(UserError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<(), UserError> {
        let id = parse_id(id)?;
        if !self.repo.delete(id).await? {
            return Err(UserError::NotFound);
        }
        Ok(())
    }
}
