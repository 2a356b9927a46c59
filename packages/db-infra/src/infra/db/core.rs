use std::future::Future;
use std::path::Path;
use std::time::Duration;

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use tracing::{info, trace, warn};

use crate::config::db::{make_conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::DbInfraError;

/// What a pool is going to be used for; drives its sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPurpose {
    App,
    Admin,
}

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        attempt,
                        max_attempts, interval_ms, "connection_retry=failed"
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DbInfraError::Connect {
        message: "no error recorded after max attempts".to_string(),
    }))
}

fn connect_options(url: &str, db_kind: DbKind, purpose: PoolPurpose) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    match (db_kind, purpose) {
        // Every connection to `sqlite::memory:` is its own database.
        (DbKind::SqliteMemory, _) => {
            opt.min_connections(1).max_connections(1);
        }
        (_, PoolPurpose::Admin) => {
            opt.min_connections(1).max_connections(1);
        }
        (DbKind::SqliteFile, PoolPurpose::App) => {
            opt.min_connections(1).max_connections(4);
        }
        (DbKind::Postgres, PoolPurpose::App) => {
            opt.min_connections(1).max_connections(16);
        }
    }
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    opt
}

/// Open a pool for an explicit connection string.
pub async fn connect_pool(
    url: &str,
    db_kind: DbKind,
    purpose: PoolPurpose,
) -> Result<DatabaseConnection, DbInfraError> {
    let opt = connect_options(url, db_kind, purpose);

    let pool = if db_kind == DbKind::Postgres {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt)
                        .await
                        .map_err(|e| DbInfraError::Connect {
                            message: format!("failed to connect to Postgres: {e}"),
                        })
                }
            },
            5,
            500,
        )
        .await?
    } else {
        if db_kind == DbKind::SqliteFile {
            ensure_sqlite_parent_dir(url)?;
        }
        Database::connect(opt)
            .await
            .map_err(|e| DbInfraError::Connect {
                message: format!("failed to connect to SQLite: {e}"),
            })?
    };

    if db_kind.is_sqlite() {
        apply_sqlite_pragmas(&pool, db_kind).await?;
    }

    info!(
        db_kind = ?db_kind,
        purpose = ?purpose,
        url = %sanitize_db_url(url),
        "database pool ready"
    );
    Ok(pool)
}

pub async fn build_admin_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;
    connect_pool(&url, db_kind, PoolPurpose::Admin).await
}

/// Connect for the application and make sure the schema is current.
///
/// Postgres migrates through a separate owner-level pool; SQLite migrates on
/// the application pool itself (required for in-memory databases).
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    if db_kind == DbKind::Postgres {
        let admin = build_admin_pool(env, db_kind).await?;
        migrate_up_if_needed(&admin).await?;
        drop(admin);

        let url = make_conn_spec(env, db_kind, DbOwner::App)?;
        return connect_pool(&url, db_kind, PoolPurpose::App).await;
    }

    let url = make_conn_spec(env, db_kind, DbOwner::App)?;
    bootstrap_db_at(&url, db_kind).await
}

/// Connect to an explicit URL and migrate it up on the same pool.
pub async fn bootstrap_db_at(
    url: &str,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let pool = connect_pool(url, db_kind, PoolPurpose::App).await?;
    migrate_up_if_needed(&pool).await?;
    Ok(pool)
}

async fn migrate_up_if_needed(pool: &DatabaseConnection) -> Result<(), DbInfraError> {
    if fast_path_schema_check(pool).await? {
        info!("migrate=skipped up_to_date=true");
        return Ok(());
    }
    migrate(pool, MigrationCommand::Up)
        .await
        .map_err(|e| DbInfraError::Migration {
            message: format!("migration execution failed: {e}"),
        })
}

pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let admin_pool = build_admin_pool(env, db_kind).await?;
    orchestrate_migration_internal(&admin_pool, env, db_kind, command).await
}

pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    info!(env = ?env, db_kind = ?db_kind, command = ?command, "migrate=start");

    if command == MigrationCommand::Up && fast_path_schema_check(pool).await? {
        info!("migrate=skipped up_to_date=true");
        return Ok(());
    }

    migrate(pool, command)
        .await
        .map_err(|e| DbInfraError::Migration {
            message: format!("migration execution failed: {e}"),
        })?;

    let expected_count = Migrator::migrations().len();
    let applied_count = Migrator::get_applied_migrations(pool)
        .await
        .map(|m| m.len())
        .unwrap_or(0);
    info!(expected_count, applied_count, "migrate=counts");

    let consistent = match command {
        MigrationCommand::Reset => applied_count == 0,
        MigrationCommand::Up | MigrationCommand::Fresh | MigrationCommand::Refresh => {
            applied_count == expected_count
        }
        MigrationCommand::Down | MigrationCommand::Status => true,
    };
    if !consistent {
        return Err(DbInfraError::Migration {
            message: format!(
                "post-migration check failed for {command:?}: {applied_count} of {expected_count} migrations applied"
            ),
        });
    }

    info!("migrate=done");
    Ok(())
}

/// Mask the password in a connection string for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        Some(colon_pos) if !auth_part[..colon_pos].ends_with('/') => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}

async fn fast_path_schema_check(conn: &DatabaseConnection) -> Result<bool, DbInfraError> {
    let expected_count = Migrator::migrations().len();
    let expected_last = Migrator::migrations()
        .last()
        .map(|m| m.name().to_string())
        .unwrap_or_default();

    let (current_count, current_last) = match Migrator::get_applied_migrations(conn).await {
        Ok(migrations) => (
            migrations.len(),
            migrations.last().map(|m| m.name().to_string()),
        ),
        Err(DbErr::Exec(_)) => {
            trace!(fastpath = "miss", reason = "migration_table_missing");
            return Ok(false);
        }
        Err(e) => {
            return Err(DbInfraError::Migration {
                message: format!("failed to get applied migrations: {e}"),
            });
        }
    };

    let up_to_date = current_count == expected_count
        && !expected_last.is_empty()
        && current_last.as_deref() == Some(expected_last.as_str());

    trace!(
        fastpath = if up_to_date { "hit" } else { "miss" },
        current_count,
        expected_count,
        current_last = %current_last.as_deref().unwrap_or(""),
        expected_last = %expected_last
    );

    Ok(up_to_date)
}

fn ensure_sqlite_parent_dir(url: &str) -> Result<(), DbInfraError> {
    let path = url
        .trim_start_matches("sqlite://")
        .split('?')
        .next()
        .unwrap_or_default();
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DbInfraError::config(format!(
                    "failed to create SQLite directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    Ok(())
}

async fn apply_sqlite_pragmas(
    pool: &DatabaseConnection,
    db_kind: DbKind,
) -> Result<(), DbInfraError> {
    // journal_mode is persisted in the database file, so setting it through a
    // single pooled connection is enough.
    if db_kind != DbKind::SqliteFile {
        return Ok(());
    }
    let pragma = "PRAGMA journal_mode = WAL";
    pool.execute(Statement::from_string(
        pool.get_database_backend(),
        pragma.to_string(),
    ))
    .await
    .map_err(|e| DbInfraError::Connect {
        message: format!("failed to apply '{pragma}': {e}"),
    })?;
    Ok(())
}
