use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::model::LogisticCompatibilityModel;
use crate::routes::with_compatibility_routes;
use crate::toolkit::LightweightToolkit;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use excipient_ai::config::AppConfig;
use excipient_ai::error::AppError;
use excipient_ai::telemetry;
use excipient_ai::workflows::compatibility::CompatibilityService;
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
    if let Some(model_path) = args.model.take() {
        config.model.weights_path = model_path;
    }

    telemetry::init(&config.telemetry)?;

    // A model that cannot be provisioned is fatal here; per-request failures
    // never are.
    let model = LogisticCompatibilityModel::from_path(&config.model.weights_path)?;
    let toolkit = LightweightToolkit::new();
    let service = Arc::new(CompatibilityService::new(Arc::new(toolkit), Arc::new(model)));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_compatibility_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, model = %config.model.weights_path, "compatibility prediction service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
