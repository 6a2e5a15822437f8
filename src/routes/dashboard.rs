//! Dashboard routes: one activation per request.
//!
//! A client disconnect drops the handler future and with it the
//! [`ViewHandle`](crate::services::view::ViewHandle), which abandons the
//! in-flight fetches.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::dashboard::ViewState;
use crate::services::presentation::{self, DashboardPage};
use crate::services::view;
use crate::AppState;

/// GET /api/v1/dashboard — rendered dashboard page.
pub async fn page(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardPage>>, AppError> {
    let mut handle = view::activate(state.store.clone());
    let settled = handle.settled().await?;

    match settled.as_ref() {
        ViewState::Ready(snapshot) => Ok(ApiResponse::success(presentation::render(
            snapshot,
            &state.locale,
        ))),
        ViewState::Failed { .. } => Err(AppError::DashboardUnavailable),
        ViewState::Loading => Err(AppError::Internal(format!(
            "activation {} settled while loading",
            handle.activation_id()
        ))),
    }
}

/// GET /api/v1/dashboard/state — raw settled view state.
pub async fn view_state(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ViewState>), AppError> {
    let mut handle = view::activate(state.store.clone());
    let settled = handle.settled().await?;

    let status = match settled.as_ref() {
        ViewState::Failed { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    Ok((status, Json(settled.as_ref().clone())))
}
