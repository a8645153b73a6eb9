//! Maintenance listing service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{MaintenanceQuery, MaintenanceRepository, MaintenanceRepositoryError};
use crate::domain::{Actor, Error, MaintenanceCheck, sort_by_schedule};

fn map_repository_error(error: MaintenanceRepositoryError) -> Error {
    match error {
        MaintenanceRepositoryError::Connection { message } => {
            Error::internal(format!("maintenance repository unavailable: {message}"))
        }
        MaintenanceRepositoryError::Query { message } => {
            Error::internal(format!("maintenance repository error: {message}"))
        }
    }
}

/// Maintenance service implementing [`MaintenanceQuery`].
#[derive(Clone)]
pub struct MaintenanceService<R> {
    repo: Arc<R>,
}

impl<R> MaintenanceService<R> {
    /// Create a new maintenance service.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> MaintenanceQuery for MaintenanceService<R>
where
    R: MaintenanceRepository,
{
    async fn list(&self, actor: &Actor) -> Result<Vec<MaintenanceCheck>, Error> {
        let mut checks: Vec<MaintenanceCheck> = self
            .repo
            .list_for_hostel(&actor.hostel_id)
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .filter(|check| actor.is_in(check.hostel_id))
            .collect();
        sort_by_schedule(&mut checks);
        Ok(checks)
    }
}
