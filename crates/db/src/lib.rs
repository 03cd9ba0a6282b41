//! SQLite adapter: connection pool factory, module migration runner, and
//! scalar field codecs for TEXT-encoded columns.

pub mod codec;

use std::path::Path;

use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use vitrin_kernel::module::Migration;
use vitrin_kernel::settings::DatabaseSettings;

/// Build a `sqlite://` URL from an absolute filesystem path.
fn build_sqlite_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Open a connection pool for the configured database.
///
/// `:memory:` gets a single-connection pool with idle reaping disabled;
/// SQLite gives every connection its own private in-memory database, so a
/// second connection (or a reopened one) would see an empty schema.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    if settings.path == ":memory:" {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .with_context(|| "failed to open in-memory database")?;
        return Ok(pool);
    }

    let path = Path::new(&settings.path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .with_context(|| "unable to resolve current directory")?
            .join(path)
    };

    let url = build_sqlite_url(&absolute);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&url)
        .await
        .with_context(|| format!("failed to open database at {}", settings.path))?;

    Ok(pool)
}

async fn has_table(pool: &SqlitePool, table_name: &str) -> anyhow::Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(1) FROM sqlite_master WHERE type='table' AND name = ?1")
            .bind(table_name)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// Apply pending module migrations, recording each in the ledger table.
///
/// Takes `(module name, migration)` pairs as collected by the registry.
/// Already-recorded migrations are skipped, so re-running is a no-op.
/// Returns the number of migrations applied this run.
pub async fn run_migrations(
    pool: &SqlitePool,
    migrations: &[(String, Migration)],
) -> anyhow::Result<usize> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _vitrin_migrations (
            module TEXT NOT NULL,
            id TEXT NOT NULL,
            applied_at TEXT NOT NULL,
            PRIMARY KEY (module, id)
        )",
    )
    .execute(pool)
    .await
    .with_context(|| "failed to create migrations ledger")?;

    let mut applied = 0usize;

    for (module, migration) in migrations {
        let seen: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM _vitrin_migrations WHERE module = ?1 AND id = ?2",
        )
        .bind(module)
        .bind(migration.id)
        .fetch_one(pool)
        .await?;

        if seen > 0 {
            continue;
        }

        tracing::info!(module = %module, id = migration.id, "applying migration");

        sqlx::query(migration.up)
            .execute(pool)
            .await
            .with_context(|| format!("migration '{}/{}' failed", module, migration.id))?;

        sqlx::query("INSERT INTO _vitrin_migrations (module, id, applied_at) VALUES (?1, ?2, ?3)")
            .bind(module)
            .bind(migration.id)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(pool)
            .await?;

        applied += 1;
    }

    if applied > 0 {
        tracing::info!(count = applied, "database migrations applied");
    }

    Ok(applied)
}

/// True when a sqlx error is a UNIQUE constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.message().contains("UNIQUE constraint failed"),
        _ => false,
    }
}

/// True when a sqlx error is a FOREIGN KEY constraint violation.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.message().contains("FOREIGN KEY constraint failed"),
        _ => false,
    }
}
