use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; usernames are unique
    async fn insert(&self, user: User) -> UserResult<User>;

    async fn find_by_username(&self, username: String) -> UserResult<Option<User>>;
}
