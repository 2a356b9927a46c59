pub mod core;

pub use core::{
    bootstrap_db, bootstrap_db_at, build_admin_pool, connect_pool, orchestrate_migration,
    orchestrate_migration_internal, sanitize_db_url, PoolPurpose,
};
