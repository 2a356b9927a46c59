//! Test-binary logging.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const FILTER_VARS: [&str; 2] = ["COURIER_TEST_LOG", "RUST_LOG"];
const DEFAULT_FILTER: &str = "warn,sqlx=error";

fn filter_from_env() -> EnvFilter {
    FILTER_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a compact subscriber writing through the test harness, once per
/// process. Safe to call from every `#[ctor]` and test.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(filter_from_env())
            .with_test_writer()
            .without_time()
            .compact()
            .try_init()
            .ok();
    });
}
