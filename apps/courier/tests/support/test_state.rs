use std::env;
use std::env::VarError;
use std::str::FromStr;

use courier::infra::state::{build_state, StateBuilder};
use courier::state::app_state::AppState;
use courier::AppError;
use db_infra::db::{sqlite_file_url, DbKind, RuntimeEnv};
use tempfile::TempDir;

/// App state backed by a scratch directory. The directory (SQLite file and
/// uploads) is removed when this is dropped, so keep it alive for the test.
pub struct TestState {
    pub state: AppState,
    pub dir: TempDir,
}

fn read_env_db_kind() -> Result<Option<String>, AppError> {
    match env::var("COURIER_TEST_DB_KIND") {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(AppError::config(format!(
            "failed to read COURIER_TEST_DB_KIND: {err}"
        ))),
    }
}

/// SQLite file by default; `COURIER_TEST_DB_KIND=postgres` runs against the
/// test Postgres database instead.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    match read_env_db_kind()? {
        Some(raw) => Ok(DbKind::from_str(&raw)?),
        None => Ok(DbKind::SqliteFile),
    }
}

fn scratch_dir() -> Result<TempDir, AppError> {
    tempfile::tempdir().map_err(|e| AppError::config(format!("failed to create tempdir: {e}")))
}

pub fn test_state_builder(dir: &TempDir) -> Result<StateBuilder, AppError> {
    let builder = build_state()
        .with_env(RuntimeEnv::Test)
        .with_upload_dir(dir.path().join("uploads"));
    let builder = match resolve_test_db_kind()? {
        DbKind::SqliteFile => builder.with_db_url(
            sqlite_file_url(&dir.path().join("courier_test.db")),
            DbKind::SqliteFile,
        ),
        kind => builder.with_db(kind),
    };
    Ok(builder)
}

pub async fn build_test_state() -> Result<TestState, AppError> {
    let dir = scratch_dir()?;
    let state = test_state_builder(&dir)?.build().await?;
    Ok(TestState { state, dir })
}

/// State with an upload directory but no database.
pub async fn build_test_state_without_db() -> Result<TestState, AppError> {
    let dir = scratch_dir()?;
    let state = build_state()
        .with_upload_dir(dir.path().join("uploads"))
        .build()
        .await?;
    Ok(TestState { state, dir })
}

/// Always a brand-new SQLite file, so ids start at 1 regardless of
/// `COURIER_TEST_DB_KIND`.
pub async fn build_fresh_sqlite_state() -> Result<TestState, AppError> {
    let dir = scratch_dir()?;
    let state = build_state()
        .with_env(RuntimeEnv::Test)
        .with_upload_dir(dir.path().join("uploads"))
        .with_db_url(
            sqlite_file_url(&dir.path().join("courier_fresh.db")),
            DbKind::SqliteFile,
        )
        .build()
        .await?;
    Ok(TestState { state, dir })
}
