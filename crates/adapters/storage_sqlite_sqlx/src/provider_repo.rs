//! `SQLite` implementation of [`ProviderRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use servicecore_app::ports::ProviderRepository;
use servicecore_domain::error::ServiceCoreError;
use servicecore_domain::id::{ProviderId, ServiceTypeId, UserId};
use servicecore_domain::provider::{NewProvider, Provider, ProviderProfile};
use servicecore_domain::service_type::ServiceType;

use crate::codec;
use crate::error::StorageError;

/// Wrapper for converting joined provider rows into domain [`Provider`].
struct Wrapper(Provider);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Provider> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let service_type_id = ServiceTypeId::new(row.try_get("service_type_id")?);
        let has_cancellation: i64 = row.try_get("has_cancellation")?;
        let is_deleted: i64 = row.try_get("is_deleted")?;
        let updated_by: Option<i64> = row.try_get("updated_by")?;

        Ok(Self(Provider {
            id: ProviderId::new(row.try_get("id")?),
            user_id: UserId::new(row.try_get("user_id")?),
            profile: ProviderProfile {
                service_type_id,
                lat: row.try_get("lat")?,
                lng: row.try_get("lng")?,
                geo_radius: row.try_get("geo_radius")?,
                advance_pay_type: codec::parsed(row, "advance_pay_type")?,
                advance_value: codec::optional_decimal(row, "advance_value")?,
                has_cancellation: has_cancellation != 0,
                cancellation_time: row.try_get("cancellation_time")?,
                capacity: row.try_get("capacity")?,
                logo: row.try_get("logo")?,
            },
            status: row.try_get("status")?,
            created_at: codec::timestamp(row, "created_at")?,
            updated_at: codec::timestamp(row, "updated_at")?,
            updated_by: updated_by.map(UserId::new),
            is_deleted: is_deleted != 0,
            service_type: ServiceType {
                id: service_type_id,
                name: row.try_get("service_type_name")?,
                description: row.try_get("service_type_description")?,
                icon: row.try_get("service_type_icon")?,
            },
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO service_providers (
        user_id, service_type_id, lat, lng, geo_radius, advance_pay_type, advance_value,
        has_cancellation, cancellation_time, capacity, logo, status, created_at, updated_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
";

const SELECT_JOINED: &str = r"
    SELECT p.*,
        t.name AS service_type_name,
        t.description AS service_type_description,
        t.icon AS service_type_icon
    FROM service_providers p
    JOIN service_types t ON t.id = p.service_type_id
";

const UPDATE: &str = r"
    UPDATE service_providers SET
        service_type_id = ?, lat = ?, lng = ?, geo_radius = ?, advance_pay_type = ?,
        advance_value = ?, has_cancellation = ?, cancellation_time = ?, capacity = ?, logo = ?,
        status = ?, updated_at = ?, updated_by = ?, is_deleted = ?
    WHERE id = ?
";

/// `SQLite`-backed provider repository.
#[derive(Clone)]
pub struct SqliteProviderRepository {
    pool: SqlitePool,
}

impl SqliteProviderRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ProviderRepository for SqliteProviderRepository {
    async fn create(&self, provider: NewProvider) -> Result<Provider, ServiceCoreError> {
        let profile = &provider.profile;
        let created_at = codec::encode_timestamp(provider.created_at);
        let result = sqlx::query(INSERT)
            .bind(provider.user_id.get())
            .bind(profile.service_type_id.get())
            .bind(profile.lat.as_deref())
            .bind(profile.lng.as_deref())
            .bind(profile.geo_radius)
            .bind(profile.advance_pay_type.as_str())
            .bind(profile.advance_value.map(|v| v.to_string()))
            .bind(profile.has_cancellation)
            .bind(profile.cancellation_time)
            .bind(profile.capacity)
            .bind(profile.logo.as_deref())
            .bind(&created_at)
            .bind(&created_at)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let row: Wrapper = sqlx::query_as(&format!("{SELECT_JOINED} WHERE p.id = ?"))
            .bind(result.last_insert_rowid())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn get_by_id(&self, id: ProviderId) -> Result<Option<Provider>, ServiceCoreError> {
        let row: Option<Wrapper> = sqlx::query_as(&format!(
            "{SELECT_JOINED} WHERE p.id = ? AND p.is_deleted = 0"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Provider>, ServiceCoreError> {
        let rows: Vec<Wrapper> = sqlx::query_as(&format!(
            "{SELECT_JOINED} WHERE p.user_id = ? AND p.is_deleted = 0 ORDER BY p.id"
        ))
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, provider: Provider) -> Result<Provider, ServiceCoreError> {
        let profile = &provider.profile;
        sqlx::query(UPDATE)
            .bind(profile.service_type_id.get())
            .bind(profile.lat.as_deref())
            .bind(profile.lng.as_deref())
            .bind(profile.geo_radius)
            .bind(profile.advance_pay_type.as_str())
            .bind(profile.advance_value.map(|v| v.to_string()))
            .bind(profile.has_cancellation)
            .bind(profile.cancellation_time)
            .bind(profile.capacity)
            .bind(profile.logo.as_deref())
            .bind(provider.status)
            .bind(codec::encode_timestamp(provider.updated_at))
            .bind(provider.updated_by.map(UserId::get))
            .bind(provider.is_deleted)
            .bind(provider.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use servicecore_domain::provider::{AdvancePayType, ProviderDraft};
    use servicecore_domain::time::now;

    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteProviderRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteProviderRepository::new(db.pool().clone())
    }

    fn new_provider(user: i64) -> NewProvider {
        let mut profile = ProviderDraft::new(ServiceTypeId::new(3))
            .located_at("40.7128", "-74.0060")
            .into_profile();
        profile.advance_pay_type = AdvancePayType::Amount;
        profile.advance_value = Some(Decimal::new(2550, 2));
        NewProvider {
            user_id: UserId::new(user),
            profile,
            created_at: now(),
        }
    }

    #[tokio::test]
    async fn should_create_and_retrieve_provider_with_service_type() {
        let repo = setup().await;
        let created = repo.create(new_provider(1)).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.user_id, UserId::new(1));
        assert_eq!(fetched.profile, created.profile);
        assert_eq!(fetched.profile.advance_value, Some(Decimal::new(2550, 2)));
        assert_eq!(fetched.service_type.name, "Hair Salon");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn should_return_none_when_provider_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(ProviderId::new(77)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_find_active_providers_by_user() {
        let repo = setup().await;
        let first = repo.create(new_provider(1)).await.unwrap();
        let second = repo.create(new_provider(1)).await.unwrap();
        repo.create(new_provider(2)).await.unwrap();

        let mut deleted = first.clone();
        deleted.is_deleted = true;
        repo.update(deleted).await.unwrap();

        let found = repo.find_by_user(UserId::new(1)).await.unwrap();
        let ids: Vec<ProviderId> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id]);
    }

    #[tokio::test]
    async fn should_persist_updates() {
        let repo = setup().await;
        let mut provider = repo.create(new_provider(1)).await.unwrap();

        provider.profile.capacity = 5;
        provider.profile.has_cancellation = true;
        provider.profile.cancellation_time = Some(60);
        provider.updated_by = Some(UserId::new(4));
        repo.update(provider.clone()).await.unwrap();

        let fetched = repo.get_by_id(provider.id).await.unwrap().unwrap();
        assert_eq!(fetched.profile.capacity, 5);
        assert!(fetched.profile.has_cancellation);
        assert_eq!(fetched.profile.cancellation_time, Some(60));
        assert_eq!(fetched.updated_by, Some(UserId::new(4)));
    }

    #[tokio::test]
    async fn should_hide_soft_deleted_provider() {
        let repo = setup().await;
        let mut provider = repo.create(new_provider(1)).await.unwrap();
        provider.is_deleted = true;
        repo.update(provider.clone()).await.unwrap();

        assert!(repo.get_by_id(provider.id).await.unwrap().is_none());
    }
}
