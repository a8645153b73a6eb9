//! PostgreSQL-backed `HostelRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HostelRepository, HostelRepositoryError};
use crate::domain::{Hostel, HostelId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::HostelRow;
use super::pool::{DbPool, PoolError};
use super::schema::hostels;

/// Diesel-backed implementation of the hostel repository port.
#[derive(Clone)]
pub struct DieselHostelRepository {
    pool: DbPool,
}

impl DieselHostelRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HostelRepositoryError {
    map_basic_pool_error(error, HostelRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> HostelRepositoryError {
    map_basic_diesel_error(
        error,
        HostelRepositoryError::query,
        HostelRepositoryError::connection,
    )
}

#[async_trait]
impl HostelRepository for DieselHostelRepository {
    async fn find_by_id(&self, id: &HostelId) -> Result<Option<Hostel>, HostelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = hostels::table
            .filter(hostels::id.eq(id.as_uuid()))
            .select(HostelRow::as_select())
            .first::<HostelRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(|row| Hostel::new(HostelId::from_uuid(row.id), row.name, row.slug)))
    }
}
