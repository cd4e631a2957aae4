use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use super::chem::ChemistryToolkit;
use super::model::CompatibilityModel;
use super::service::{CompatibilityService, PredictionRequest, PredictionResponse};

/// Router builder exposing the prediction endpoint over an injected service.
pub fn compatibility_router<C, M>(service: Arc<CompatibilityService<C, M>>) -> Router
where
    C: ChemistryToolkit + 'static,
    M: CompatibilityModel + 'static,
{
    Router::new()
        .route(
            "/api/v1/compatibility/predict",
            post(predict_handler::<C, M>),
        )
        .with_state(service)
}

/// Error-status bodies travel with a client-error code so callers that only
/// look at HTTP status still see the rejection; the body keeps the
/// `status`/`message` shape the frontend consumes.
pub(crate) async fn predict_handler<C, M>(
    State(service): State<Arc<CompatibilityService<C, M>>>,
    axum::Json(request): axum::Json<PredictionRequest>,
) -> Response
where
    C: ChemistryToolkit + 'static,
    M: CompatibilityModel + 'static,
{
    let response = service.predict(&request);
    let status = match &response {
        PredictionResponse::Success { .. } => StatusCode::OK,
        PredictionResponse::Error { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };

    (status, axum::Json(response)).into_response()
}
