pub mod app;

pub use app::AppConfig;
pub use db_infra::db;
