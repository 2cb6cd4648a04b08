use aerodesk_core::repository::{Collection, Predicate, Record, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgConnection, Pool, Postgres};
use std::marker::PhantomData;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Migrations completed successfully.");
        Ok(())
    }
}

/// Records stored as JSONB rows of the `documents` table, one row per record,
/// keyed by a server-generated uuid.
///
/// Mutations take a transaction-scoped advisory lock on the collection name,
/// which makes them single-writer across every server process sharing the database.
pub struct DocumentCollection<T> {
    pool: Pool<Postgres>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> DocumentCollection<T> {
    pub fn new(db: &DbClient) -> Self {
        Self {
            pool: db.pool.clone(),
            _marker: PhantomData,
        }
    }

    async fn lock(conn: &mut PgConnection) -> StoreResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(T::COLLECTION)
            .execute(conn)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn rows(conn: &mut PgConnection) -> StoreResult<Vec<(Uuid, T)>> {
        let rows: Vec<(Uuid, Json<Value>)> = sqlx::query_as(
            "SELECT id, body FROM documents WHERE collection = $1 ORDER BY created_at, id",
        )
        .bind(T::COLLECTION)
        .fetch_all(conn)
        .await
        .map_err(backend)?;

        rows.into_iter()
            .map(|(id, Json(body))| {
                serde_json::from_value(body)
                    .map(|record| (id, record))
                    .map_err(|e| StoreError::Corrupt {
                        path: format!("documents/{}/{}", T::COLLECTION, id),
                        source: e,
                    })
            })
            .collect()
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl<T: Record> Collection<T> for DocumentCollection<T> {
    async fn list(&self) -> StoreResult<Vec<T>> {
        let mut conn = self.pool.acquire().await.map_err(backend)?;
        let rows = Self::rows(&mut conn).await?;
        Ok(rows.into_iter().map(|(_, record)| record).collect())
    }

    async fn append(&self, mut record: T) -> StoreResult<T> {
        let mut tx = self.pool.begin().await.map_err(backend)?;
        Self::lock(&mut tx).await?;

        let existing: Vec<T> = Self::rows(&mut tx)
            .await?
            .into_iter()
            .map(|(_, record)| record)
            .collect();
        record.assign_id(&existing);

        let doc_id = Uuid::new_v4();
        let body = serde_json::to_value(&record)?;
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(doc_id)
            .bind(T::COLLECTION)
            .bind(Json(body))
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        tx.commit().await.map_err(backend)?;
        info!("Inserted document {} into {}", doc_id, T::COLLECTION);

        Ok(record)
    }

    async fn remove(&self, predicate: Predicate<'_, T>) -> StoreResult<usize> {
        let mut tx = self.pool.begin().await.map_err(backend)?;
        Self::lock(&mut tx).await?;

        let doomed: Vec<Uuid> = Self::rows(&mut tx)
            .await?
            .into_iter()
            .filter(|(_, record)| predicate(record))
            .map(|(id, _)| id)
            .collect();

        if !doomed.is_empty() {
            sqlx::query("DELETE FROM documents WHERE id = ANY($1)")
                .bind(&doomed)
                .execute(&mut *tx)
                .await
                .map_err(backend)?;
        }

        tx.commit().await.map_err(backend)?;
        Ok(doomed.len())
    }
}
