// src/handlers/settings.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    models::settings::{Settings, UpdateSettingsRequest},
};

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Configuração da organização", body = Settings)
    )
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state
        .settings_store
        .get()
        .await
        .map_err(AppError::to_api_error)?;

    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Configuração atualizada", body = Settings)
    )
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateSettingsRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .settings_store
        .upsert(&payload)
        .await
        .map_err(AppError::to_api_error)?;

    Ok((StatusCode::OK, Json(updated)))
}
