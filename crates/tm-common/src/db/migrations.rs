use deadpool_postgres::PoolError;
use thiserror::Error;
use tokio_postgres::Error as PgError;
use tracing::{info, instrument};

use crate::db::PgPool;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to run migration: {0}")]
    Postgres(#[from] PgError),
}

struct Migration {
    id: i32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    id: 1,
    description: "profile collections with embedding fields",
    sql: r#"
CREATE TABLE IF NOT EXISTS tm.candidates (
    id TEXT PRIMARY KEY,
    headline TEXT,
    summary TEXT,
    skills JSONB,
    soft_skills TEXT,
    competencies TEXT,
    sector_id TEXT,
    hierarchy_level TEXT,
    embedding_vector REAL[],
    embedding_updated_at TIMESTAMPTZ
);

CREATE TABLE IF NOT EXISTS tm.offers (
    id TEXT PRIMARY KEY,
    title TEXT,
    description TEXT,
    required_skills JSONB,
    desirable_skills JSONB,
    competencies TEXT,
    sector_id TEXT,
    hierarchy_level TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    embedding_vector REAL[],
    embedding_updated_at TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS idx_offers_active_sector
    ON tm.offers(sector_id, id)
    WHERE status = 'active';

CREATE INDEX IF NOT EXISTS idx_candidates_missing_vector
    ON tm.candidates(id)
    WHERE embedding_vector IS NULL;

CREATE INDEX IF NOT EXISTS idx_offers_missing_vector
    ON tm.offers(id)
    WHERE embedding_vector IS NULL;
"#,
}];

/// Aplica las migraciones pendientes. Cada una corre en su transacción y se
/// registra en `tm.schema_migrations`; re-ejecutar es inocuo.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrationError> {
    let mut client = pool.get().await?;
    client
        .batch_execute(
            "CREATE SCHEMA IF NOT EXISTS tm;
             CREATE TABLE IF NOT EXISTS tm.schema_migrations (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
             );",
        )
        .await?;

    for migration in MIGRATIONS {
        let already_applied: bool = client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM tm.schema_migrations WHERE id = $1)",
                &[&migration.id],
            )
            .await?
            .get(0);

        if already_applied {
            continue;
        }

        let tx = client.transaction().await?;
        tx.batch_execute(migration.sql).await?;
        tx.execute(
            "INSERT INTO tm.schema_migrations (id, description) VALUES ($1, $2)",
            &[&migration.id, &migration.description],
        )
        .await?;
        tx.commit().await?;

        info!(
            id = migration.id,
            description = migration.description,
            "applied migration"
        );
    }

    Ok(())
}
