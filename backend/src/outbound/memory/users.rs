//! In-memory credential store.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserAccount, UserId};

use super::lock;

/// Account store keyed by insertion order.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = lock(&self.accounts).map_err(UserPersistenceError::query)?;
        let email = account.user.email();
        if accounts.iter().any(|stored| stored.user.email() == email) {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = lock(&self.accounts).map_err(UserPersistenceError::query)?;
        Ok(accounts
            .iter()
            .find(|stored| stored.user.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = lock(&self.accounts).map_err(UserPersistenceError::query)?;
        Ok(accounts
            .iter()
            .find(|stored| stored.user.id() == *id)
            .map(|stored| stored.user.clone()))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let accounts = lock(&self.accounts).map_err(UserPersistenceError::query)?;
        Ok(accounts
            .iter()
            .filter(|stored| ids.contains(&stored.user.id()))
            .map(|stored| stored.user.clone())
            .collect())
    }
}
