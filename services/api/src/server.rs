use crate::cli::ServeArgs;
use crate::infra::{seed_directory, AppState, CheckpointServices};
use crate::routes::with_checkpoint_routes;
use avicheck::config::AppConfig;
use avicheck::error::AppError;
use avicheck::telemetry;
use avicheck::workflows::WorkflowError;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = seed_directory().map_err(WorkflowError::from)?;
    let services = CheckpointServices::in_memory(&config.checkpoint, directory);

    let app = with_checkpoint_routes(&services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        radius_km = config.checkpoint.recommendation_radius_km,
        "avicheck service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
