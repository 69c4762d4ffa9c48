//! `SQLite` implementation of [`BusinessHoursRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection, SqlitePool};

use servicecore_app::ports::BusinessHoursRepository;
use servicecore_domain::business_hours::{BusinessHours, HoursWindow, NewBusinessHours};
use servicecore_domain::error::ServiceCoreError;
use servicecore_domain::id::{BusinessHoursId, ProviderId};

use crate::codec;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`BusinessHours`].
struct Wrapper(BusinessHours);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<BusinessHours> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let is_closed: i64 = row.try_get("is_closed")?;
        let is_deleted: i64 = row.try_get("is_deleted")?;

        Ok(Self(BusinessHours {
            id: BusinessHoursId::new(row.try_get("id")?),
            provider_id: ProviderId::new(row.try_get("provider_id")?),
            window: HoursWindow {
                day_of_week: codec::day_of_week(row, "day_of_week")?,
                open_time: codec::clock(row, "open_time")?,
                close_time: codec::clock(row, "close_time")?,
                is_closed: is_closed != 0,
            },
            status: row.try_get("status")?,
            created_at: codec::timestamp(row, "created_at")?,
            updated_at: codec::timestamp(row, "updated_at")?,
            is_deleted: is_deleted != 0,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO business_hours (
        provider_id, day_of_week, open_time, close_time, is_closed, status, created_at, updated_at
    )
    VALUES (?, ?, ?, ?, ?, 0, ?, ?)
";

// Prefer the active row, then the most recent deleted one.
const SELECT_SLOT: &str = r"
    SELECT id FROM business_hours
    WHERE provider_id = ? AND day_of_week = ?
    ORDER BY is_deleted ASC, id DESC
    LIMIT 1
";

const REVIVE: &str = r"
    UPDATE business_hours
    SET open_time = ?, close_time = ?, is_closed = ?, updated_at = ?, is_deleted = 0
    WHERE id = ?
";

const SELECT_ANY_BY_ID: &str = "SELECT * FROM business_hours WHERE id = ?";

const SELECT_BY_ID: &str = "SELECT * FROM business_hours WHERE id = ? AND is_deleted = 0";

const SELECT_BY_PROVIDER: &str = r"
    SELECT * FROM business_hours
    WHERE provider_id = ? AND is_deleted = 0
    ORDER BY day_of_week ASC
";

const SELECT_BY_PROVIDER_AND_DAY: &str = r"
    SELECT * FROM business_hours
    WHERE provider_id = ? AND day_of_week = ? AND is_deleted = 0
";

const UPDATE: &str = r"
    UPDATE business_hours
    SET day_of_week = ?, open_time = ?, close_time = ?, is_closed = ?, status = ?,
        updated_at = ?, is_deleted = ?
    WHERE id = ?
";

async fn upsert_in(
    conn: &mut SqliteConnection,
    hours: &NewBusinessHours,
) -> Result<BusinessHours, sqlx::Error> {
    let window = &hours.window;
    let written_at = codec::encode_timestamp(hours.created_at);
    let slot: Option<i64> = sqlx::query_scalar(SELECT_SLOT)
        .bind(hours.provider_id.get())
        .bind(window.day_of_week)
        .fetch_optional(&mut *conn)
        .await?;

    let id = match slot {
        Some(id) => {
            sqlx::query(REVIVE)
                .bind(codec::encode_clock(window.open_time))
                .bind(codec::encode_clock(window.close_time))
                .bind(window.is_closed)
                .bind(&written_at)
                .bind(id)
                .execute(&mut *conn)
                .await?;
            id
        }
        None => sqlx::query(INSERT)
            .bind(hours.provider_id.get())
            .bind(window.day_of_week)
            .bind(codec::encode_clock(window.open_time))
            .bind(codec::encode_clock(window.close_time))
            .bind(window.is_closed)
            .bind(&written_at)
            .bind(&written_at)
            .execute(&mut *conn)
            .await?
            .last_insert_rowid(),
    };

    let row: Wrapper = sqlx::query_as(SELECT_ANY_BY_ID)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(row.0)
}

/// `SQLite`-backed business-hours repository.
#[derive(Clone)]
pub struct SqliteBusinessHoursRepository {
    pool: SqlitePool,
}

impl SqliteBusinessHoursRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl BusinessHoursRepository for SqliteBusinessHoursRepository {
    async fn find_by_provider(
        &self,
        provider_id: ProviderId,
    ) -> Result<Vec<BusinessHours>, ServiceCoreError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_PROVIDER)
            .bind(provider_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_provider_and_day(
        &self,
        provider_id: ProviderId,
        day_of_week: u8,
    ) -> Result<Option<BusinessHours>, ServiceCoreError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_PROVIDER_AND_DAY)
            .bind(provider_id.get())
            .bind(day_of_week)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_by_id(
        &self,
        id: BusinessHoursId,
    ) -> Result<Option<BusinessHours>, ServiceCoreError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn upsert(&self, hours: NewBusinessHours) -> Result<BusinessHours, ServiceCoreError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        let written = upsert_in(&mut tx, &hours)
            .await
            .map_err(StorageError::from)?;
        tx.commit().await.map_err(StorageError::from)?;

        Ok(written)
    }

    async fn upsert_many(
        &self,
        hours: Vec<NewBusinessHours>,
    ) -> Result<Vec<BusinessHours>, ServiceCoreError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        let mut written = Vec::with_capacity(hours.len());
        for item in &hours {
            written.push(upsert_in(&mut tx, item).await.map_err(StorageError::from)?);
        }
        tx.commit().await.map_err(StorageError::from)?;

        Ok(written)
    }

    async fn update(&self, hours: BusinessHours) -> Result<BusinessHours, ServiceCoreError> {
        let window = &hours.window;
        sqlx::query(UPDATE)
            .bind(window.day_of_week)
            .bind(codec::encode_clock(window.open_time))
            .bind(codec::encode_clock(window.close_time))
            .bind(window.is_closed)
            .bind(hours.status)
            .bind(codec::encode_timestamp(hours.updated_at))
            .bind(hours.is_deleted)
            .bind(hours.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(hours)
    }
}

#[cfg(test)]
mod tests {
    use servicecore_app::ports::ProviderRepository;
    use servicecore_domain::business_hours::HoursDraft;
    use servicecore_domain::id::{ServiceTypeId, UserId};
    use servicecore_domain::provider::{NewProvider, ProviderDraft};
    use servicecore_domain::time::now;

    use super::*;
    use crate::pool::Config;
    use crate::provider_repo::SqliteProviderRepository;

    async fn setup() -> (SqliteBusinessHoursRepository, ProviderId) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let provider = SqliteProviderRepository::new(db.pool().clone())
            .create(NewProvider {
                user_id: UserId::new(1),
                profile: ProviderDraft::new(ServiceTypeId::new(1)).into_profile(),
                created_at: now(),
            })
            .await
            .unwrap();
        (SqliteBusinessHoursRepository::new(db.pool().clone()), provider.id)
    }

    fn new_hours(provider_id: ProviderId, day: i64, open: &str, close: &str) -> NewBusinessHours {
        NewBusinessHours {
            provider_id,
            window: HoursDraft::new(day, open, close).into_window().unwrap(),
            created_at: now(),
        }
    }

    #[tokio::test]
    async fn should_insert_and_find_hours_by_day() {
        let (repo, provider) = setup().await;
        let created = repo
            .upsert(new_hours(provider, 1, "9:00", "17:30"))
            .await
            .unwrap();

        let found = repo
            .find_by_provider_and_day(provider, 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.window, created.window);
        assert!(
            repo.find_by_provider_and_day(provider, 2)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn should_list_hours_ordered_by_day() {
        let (repo, provider) = setup().await;
        for day in [6, 2, 4] {
            repo.upsert(new_hours(provider, day, "09:00", "17:00"))
                .await
                .unwrap();
        }

        let days: Vec<u8> = repo
            .find_by_provider(provider)
            .await
            .unwrap()
            .iter()
            .map(|h| h.window.day_of_week)
            .collect();
        assert_eq!(days, vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn should_revive_soft_deleted_row_on_upsert() {
        let (repo, provider) = setup().await;
        let mut original = repo
            .upsert(new_hours(provider, 3, "09:00", "17:00"))
            .await
            .unwrap();
        original.is_deleted = true;
        repo.update(original.clone()).await.unwrap();
        assert!(repo.get_by_id(original.id).await.unwrap().is_none());

        let revived = repo
            .upsert(new_hours(provider, 3, "10:00", "12:00"))
            .await
            .unwrap();
        assert_eq!(revived.id, original.id);
        assert!(!revived.is_deleted);
        assert_eq!(revived.window.close_time.to_string(), "12:00:00");
    }

    #[tokio::test]
    async fn should_overwrite_active_rows_in_bulk() {
        let (repo, provider) = setup().await;
        let monday = repo
            .upsert(new_hours(provider, 1, "09:00", "17:00"))
            .await
            .unwrap();

        let written = repo
            .upsert_many(vec![
                new_hours(provider, 1, "08:00", "16:00"),
                new_hours(provider, 5, "10:00", "14:00"),
            ])
            .await
            .unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0].id, monday.id);
        assert_eq!(repo.find_by_provider(provider).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_persist_updates() {
        let (repo, provider) = setup().await;
        let mut hours = repo
            .upsert(new_hours(provider, 1, "09:00", "17:00"))
            .await
            .unwrap();
        hours.window.day_of_week = 2;
        hours.window.is_closed = true;
        repo.update(hours.clone()).await.unwrap();

        let fetched = repo.get_by_id(hours.id).await.unwrap().unwrap();
        assert_eq!(fetched.window.day_of_week, 2);
        assert!(fetched.window.is_closed);
    }
}
