//! Sqlite-backed identity directory

use async_trait::async_trait;
use gatehouse_core::{
    directory_error, identity_not_found, ErrorContext, GatehouseError, GatehouseResult, Identity,
    IdentityDirectory,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Identity row as stored in sqlite
#[derive(Debug, sqlx::FromRow)]
struct IdentityRecord {
    id: String,
    name: String,
    display_name: Option<String>,
    created_at: String, // ISO 8601 string
}

impl IdentityRecord {
    /// Convert to Identity
    fn to_identity(&self) -> GatehouseResult<Identity> {
        let created_at = self.created_at.parse().map_err(|e: chrono::ParseError| {
            directory_error!(
                format!("Invalid created_at for identity {}: {}", self.id, e),
                "sqlite_directory"
            )
        })?;

        Ok(Identity {
            id: self.id.clone(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            created_at,
        })
    }
}

/// Sqlite-backed directory
#[derive(Debug, Clone)]
pub struct SqliteDirectory {
    pool: SqlitePool,
}

impl SqliteDirectory {
    /// Open the database and bootstrap the identities table
    pub async fn connect(database_url: &str) -> GatehouseResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| directory_error!("Failed to open identity database", "sqlite_directory", e))?;

        let directory = Self { pool };
        directory.create_tables().await?;

        info!("Sqlite identity directory ready");
        Ok(directory)
    }

    /// Create database tables
    async fn create_tables(&self) -> GatehouseResult<()> {
        let query = r#"
            CREATE TABLE IF NOT EXISTS identities (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                display_name TEXT,
                created_at TEXT NOT NULL
            )
        "#;

        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map_err(|e| directory_error!("Failed to create identities table", "sqlite_directory", e))?;

        Ok(())
    }

    /// Insert an identity, replacing any previous entry with the same name
    pub async fn insert(&self, identity: &Identity) -> GatehouseResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO identities (id, name, display_name, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&identity.id)
        .bind(&identity.name)
        .bind(&identity.display_name)
        .bind(identity.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| directory_error!("Failed to insert identity", "sqlite_directory", e))?;

        Ok(())
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl IdentityDirectory for SqliteDirectory {
    async fn find(&self, id: &str) -> GatehouseResult<Identity> {
        let record = sqlx::query_as::<_, IdentityRecord>(
            "SELECT id, name, display_name, created_at FROM identities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| directory_error!("Identity lookup failed", "sqlite_directory", e))?;

        match record {
            Some(record) => record.to_identity(),
            None => Err(identity_not_found!(
                format!("identity {}", id),
                "sqlite_directory"
            )),
        }
    }

    async fn find_by_name(&self, name: &str) -> GatehouseResult<Option<Identity>> {
        let record = sqlx::query_as::<_, IdentityRecord>(
            "SELECT id, name, display_name, created_at FROM identities WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| directory_error!("Identity lookup failed", "sqlite_directory", e))?;

        debug!("find_by_name('{}') -> match: {}", name, record.is_some());
        record.map(|r| r.to_identity()).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn in_memory_directory() -> SqliteDirectory {
        SqliteDirectory::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_find_round_trip() {
        let directory = in_memory_directory().await;
        let alice = Identity::new("alice").with_display_name("Alice Liddell");
        directory.insert(&alice).await.unwrap();

        let by_id = directory.find(&alice.id).await.unwrap();
        assert_eq!(by_id.name, "alice");
        assert_eq!(by_id.display_name.as_deref(), Some("Alice Liddell"));

        let by_name = directory.find_by_name("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, alice.id);
    }

    #[tokio::test]
    async fn test_find_unknown_id_is_not_found() {
        let directory = in_memory_directory().await;

        let result = directory.find("no-such-id").await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_name_miss_is_none() {
        let directory = in_memory_directory().await;

        let result = directory.find_by_name("ghost").await.unwrap();
        assert!(result.is_none());
    }
}
