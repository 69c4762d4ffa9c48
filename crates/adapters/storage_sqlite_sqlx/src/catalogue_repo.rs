//! `SQLite` implementation of [`CatalogueRepository`], including the public
//! search query.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use servicecore_app::ports::CatalogueRepository;
use servicecore_domain::catalogue::{CatalogueDetails, CatalogueEntry, NewCatalogueEntry};
use servicecore_domain::error::ServiceCoreError;
use servicecore_domain::id::{CatalogueEntryId, ProviderId, ServiceTypeId, UserId};
use servicecore_domain::search::{Listing, ProviderSummary, SearchFilter};
use servicecore_domain::service_type::ServiceTypeSummary;

use crate::codec;
use crate::error::StorageError;

fn entry_from_row(row: &SqliteRow) -> Result<CatalogueEntry, sqlx::Error> {
    let is_price_range: i64 = row.try_get("is_price_range")?;
    let is_deleted: i64 = row.try_get("is_deleted")?;
    let updated_by: Option<i64> = row.try_get("updated_by")?;

    Ok(CatalogueEntry {
        id: CatalogueEntryId::new(row.try_get("id")?),
        user_id: UserId::new(row.try_get("user_id")?),
        service_provider_id: ProviderId::new(row.try_get("service_provider_id")?),
        details: CatalogueDetails {
            image: row.try_get("image")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            currency: row.try_get("currency")?,
            price: codec::decimal(row, "price")?,
            is_price_range: is_price_range != 0,
            range_price: codec::optional_decimal(row, "range_price")?,
            duration_type: codec::parsed(row, "duration_type")?,
            duration: row.try_get("duration")?,
            serve_capacity: row.try_get("serve_capacity")?,
        },
        status: row.try_get("status")?,
        created_at: codec::timestamp(row, "created_at")?,
        updated_at: codec::timestamp(row, "updated_at")?,
        updated_by: updated_by.map(UserId::new),
        is_deleted: is_deleted != 0,
    })
}

/// Wrapper for converting database rows into domain [`CatalogueEntry`].
struct Wrapper(CatalogueEntry);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<CatalogueEntry> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        entry_from_row(row).map(Self)
    }
}

/// Wrapper for converting joined search rows into a [`Listing`].
struct ListingWrapper(Listing);

impl<'r> FromRow<'r, SqliteRow> for ListingWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let entry = entry_from_row(row)?;
        let service_type_id = ServiceTypeId::new(row.try_get("provider_service_type_id")?);

        Ok(Self(Listing {
            provider: ProviderSummary {
                id: entry.service_provider_id,
                service_type_id,
                lat: row.try_get("provider_lat")?,
                lng: row.try_get("provider_lng")?,
                geo_radius: row.try_get("provider_geo_radius")?,
                service_type: ServiceTypeSummary {
                    id: service_type_id,
                    name: row.try_get("service_type_name")?,
                    description: row.try_get("service_type_description")?,
                },
                distance: None,
            },
            entry,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO service_catalogue (
        user_id, service_provider_id, image, title, description, currency, price,
        is_price_range, range_price, duration_type, duration, serve_capacity,
        status, created_at, updated_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM service_catalogue WHERE id = ? AND is_deleted = 0";

const SELECT_BY_PROVIDER: &str = r"
    SELECT * FROM service_catalogue
    WHERE service_provider_id = ? AND is_deleted = 0
    ORDER BY created_at DESC, id DESC
";

const UPDATE: &str = r"
    UPDATE service_catalogue SET
        image = ?, title = ?, description = ?, currency = ?, price = ?, is_price_range = ?,
        range_price = ?, duration_type = ?, duration = ?, serve_capacity = ?, status = ?,
        updated_at = ?, updated_by = ?, is_deleted = ?
    WHERE id = ?
";

const SELECT_PUBLIC: &str = r"
    SELECT s.*,
        p.service_type_id AS provider_service_type_id,
        p.lat AS provider_lat,
        p.lng AS provider_lng,
        p.geo_radius AS provider_geo_radius,
        t.name AS service_type_name,
        t.description AS service_type_description
    FROM service_catalogue s
    JOIN service_providers p ON p.id = s.service_provider_id AND p.is_deleted = 0
    JOIN service_types t ON t.id = p.service_type_id
    WHERE s.is_deleted = 0
";

/// Escape `LIKE` metacharacters so the keyword matches literally.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// `SQLite`-backed catalogue repository.
#[derive(Clone)]
pub struct SqliteCatalogueRepository {
    pool: SqlitePool,
}

impl SqliteCatalogueRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CatalogueRepository for SqliteCatalogueRepository {
    async fn create(&self, entry: NewCatalogueEntry) -> Result<CatalogueEntry, ServiceCoreError> {
        let details = &entry.details;
        let created_at = codec::encode_timestamp(entry.created_at);
        let result = sqlx::query(INSERT)
            .bind(entry.user_id.get())
            .bind(entry.provider_id.get())
            .bind(details.image.as_deref())
            .bind(&details.title)
            .bind(details.description.as_deref())
            .bind(&details.currency)
            .bind(details.price.to_string())
            .bind(details.is_price_range)
            .bind(details.range_price.map(|v| v.to_string()))
            .bind(details.duration_type.as_str())
            .bind(details.duration)
            .bind(details.serve_capacity)
            .bind(&created_at)
            .bind(&created_at)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(CatalogueEntry {
            id: CatalogueEntryId::new(result.last_insert_rowid()),
            user_id: entry.user_id,
            service_provider_id: entry.provider_id,
            details: entry.details,
            status: 0,
            created_at: entry.created_at,
            updated_at: entry.created_at,
            updated_by: None,
            is_deleted: false,
        })
    }

    async fn get_by_id(
        &self,
        id: CatalogueEntryId,
    ) -> Result<Option<CatalogueEntry>, ServiceCoreError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_by_provider(
        &self,
        provider_id: ProviderId,
    ) -> Result<Vec<CatalogueEntry>, ServiceCoreError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_PROVIDER)
            .bind(provider_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, entry: CatalogueEntry) -> Result<CatalogueEntry, ServiceCoreError> {
        let details = &entry.details;
        sqlx::query(UPDATE)
            .bind(details.image.as_deref())
            .bind(&details.title)
            .bind(details.description.as_deref())
            .bind(&details.currency)
            .bind(details.price.to_string())
            .bind(details.is_price_range)
            .bind(details.range_price.map(|v| v.to_string()))
            .bind(details.duration_type.as_str())
            .bind(details.duration)
            .bind(details.serve_capacity)
            .bind(entry.status)
            .bind(codec::encode_timestamp(entry.updated_at))
            .bind(entry.updated_by.map(UserId::get))
            .bind(entry.is_deleted)
            .bind(entry.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(entry)
    }

    async fn find_public_services(
        &self,
        filter: SearchFilter,
    ) -> Result<Vec<Listing>, ServiceCoreError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_PUBLIC);
        if let Some(service_type_id) = filter.service_type_id {
            query
                .push(" AND p.service_type_id = ")
                .push_bind(service_type_id.get());
        }
        // LIKE only folds ASCII case; other keywords are matched below.
        if let Some(keyword) = filter.keyword.as_deref().filter(|k| k.is_ascii()) {
            let pattern = like_pattern(keyword);
            query
                .push(" AND (s.title LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR s.description LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        query.push(" ORDER BY s.created_at DESC, s.id DESC");

        let rows: Vec<ListingWrapper> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .map(|w| w.0)
            .filter(|listing| filter.admits(listing))
            .collect())
    }
}
