//! `SQLite` implementation of [`ServiceTypeRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use servicecore_app::ports::ServiceTypeRepository;
use servicecore_domain::error::ServiceCoreError;
use servicecore_domain::id::ServiceTypeId;
use servicecore_domain::service_type::ServiceType;

use crate::error::StorageError;

struct Wrapper(ServiceType);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(ServiceType {
            id: ServiceTypeId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            icon: row.try_get("icon")?,
        }))
    }
}

const SELECT_BY_ID: &str = "SELECT * FROM service_types WHERE id = ?";

/// `SQLite`-backed service-type lookup.
#[derive(Clone)]
pub struct SqliteServiceTypeRepository {
    pool: SqlitePool,
}

impl SqliteServiceTypeRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ServiceTypeRepository for SqliteServiceTypeRepository {
    async fn get_by_id(&self, id: ServiceTypeId) -> Result<Option<ServiceType>, ServiceCoreError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }
}
