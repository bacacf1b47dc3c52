use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{AdminSeed, LoginForm, User};
use crate::repository::UserRepository;

/// Service layer for login and account seeding
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Check a username and password.
    ///
    /// An unknown user and a wrong password give the same error.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn authenticate(&self, form: LoginForm) -> UserResult<User> {
        form.validate()?;

        let user = self
            .repository
            .find_by_username(form.username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&form.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Create the configured administrator unless the username is taken.
    ///
    /// Returns whether an account was created.
    #[instrument(skip(self, seed), fields(username = %seed.username))]
    pub async fn seed_admin(&self, seed: AdminSeed) -> UserResult<bool> {
        if self
            .repository
            .find_by_username(seed.username.clone())
            .await?
            .is_some()
        {
            info!("Admin user already exists");
            return Ok(false);
        }

        let password_hash = hash_password(&seed.password)?;
        self.repository
            .insert(User::new(seed.username, password_hash, true))
            .await?;

        info!("Admin user created");
        Ok(true)
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

// Password helpers

pub fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
