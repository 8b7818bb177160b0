use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::{MappingStore, StoreResult, UrlMapping, TABLE_NAME};

fn create_table_sql() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
            short_code TEXT PRIMARY KEY,
            long_url TEXT NOT NULL
        )"
    )
}

// unconditional overwrite, same as a plain key-value put
fn upsert_sql() -> String {
    format!(
        "INSERT INTO {TABLE_NAME} (short_code, long_url)
        VALUES ($1, $2)
        ON CONFLICT (short_code) DO UPDATE SET long_url = EXCLUDED.long_url"
    )
}

fn select_sql() -> String {
    format!("SELECT short_code, long_url FROM {TABLE_NAME} WHERE short_code = $1")
}

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the mapping table if it does not exist yet.
    pub async fn init(&self) -> StoreResult<()> {
        sqlx::query(&create_table_sql()).execute(&self.pool).await?;
        info!(table = TABLE_NAME, "Mapping table ready");
        Ok(())
    }
}

#[async_trait]
impl MappingStore for PostgresStore {
    async fn put(&self, mapping: &UrlMapping) -> StoreResult<()> {
        let sql = upsert_sql();
        sqlx::query(&sql)
            .bind(&mapping.short_code)
            .bind(&mapping.long_url)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, short_code: &str) -> StoreResult<Option<UrlMapping>> {
        let sql = select_sql();
        let mapping = sqlx::query_as::<_, UrlMapping>(&sql)
            .bind(short_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_target_the_shared_table() {
        for sql in [create_table_sql(), upsert_sql(), select_sql()] {
            assert!(sql.contains(TABLE_NAME), "missing table name in: {sql}");
        }
    }

    #[test]
    fn put_overwrites_existing_codes() {
        let sql = upsert_sql();
        assert!(sql.contains("ON CONFLICT (short_code) DO UPDATE"));
        assert!(!sql.contains("DO NOTHING"));
    }
}
