//! PostgreSQL-backed `MaintenanceRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MaintenanceRepository, MaintenanceRepositoryError};
use crate::domain::{HostelId, MaintenanceCheck, MaintenanceStatus};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::MaintenanceCheckRow;
use super::pool::{DbPool, PoolError};
use super::schema::maintenance_checks;

/// Diesel-backed implementation of the maintenance repository port.
#[derive(Clone)]
pub struct DieselMaintenanceRepository {
    pool: DbPool,
}

impl DieselMaintenanceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MaintenanceRepositoryError {
    map_basic_pool_error(error, MaintenanceRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MaintenanceRepositoryError {
    map_basic_diesel_error(
        error,
        MaintenanceRepositoryError::query,
        MaintenanceRepositoryError::connection,
    )
}

fn row_to_check(row: MaintenanceCheckRow) -> Result<MaintenanceCheck, MaintenanceRepositoryError> {
    let status: MaintenanceStatus = row
        .status
        .parse()
        .map_err(|err| MaintenanceRepositoryError::query(format!("check {}: {err}", row.id)))?;
    Ok(MaintenanceCheck {
        id: row.id,
        hostel_id: HostelId::from_uuid(row.hostel_id),
        title: row.title,
        status,
        scheduled_for: row.scheduled_for,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl MaintenanceRepository for DieselMaintenanceRepository {
    async fn list_for_hostel(
        &self,
        hostel_id: &HostelId,
    ) -> Result<Vec<MaintenanceCheck>, MaintenanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MaintenanceCheckRow> = maintenance_checks::table
            .filter(maintenance_checks::hostel_id.eq(hostel_id.as_uuid()))
            .order((
                maintenance_checks::scheduled_for.asc(),
                maintenance_checks::id.asc(),
            ))
            .select(MaintenanceCheckRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_check).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixed_now;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case("Completed", true)]
    #[case("Skipped", false)]
    fn validates_stored_status(#[case] status: &str, #[case] ok: bool) {
        let row = MaintenanceCheckRow {
            id: Uuid::new_v4(),
            hostel_id: Uuid::new_v4(),
            title: "Pest control".to_owned(),
            status: status.to_owned(),
            scheduled_for: fixed_now(),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        };
        assert_eq!(row_to_check(row).is_ok(), ok);
    }
}
