use actix_web::{web, App, HttpServer};
use courier::config::db::RuntimeEnv;
use courier::config::AppConfig;
use courier::infra::state::build_state;
use courier::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use courier::{routes, telemetry};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(config.db_kind)
        .with_upload_dir(&config.upload_dir)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        db_kind = ?config.db_kind,
        upload_dir = %config.upload_dir.display(),
        "courier backend starting"
    );

    let data = web::Data::new(app_state);
    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&cors_origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure_with_uploads(data.blobs.clone()))
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
