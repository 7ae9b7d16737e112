// src/handlers/esops.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::wallet::ConnectedWallet,
    models::esop::{EsopGrantPayload, EsopGrantResponse},
};

// POST /api/esops
#[utoipa::path(
    post,
    path = "/api/esops",
    tag = "ESOP",
    request_body = EsopGrantPayload,
    responses(
        (status = 200, description = "E-mail de concessão enviado", body = EsopGrantResponse),
        (status = 500, description = "Funcionário inexistente, data inválida ou falha no envio")
    ),
    params(
        ("x-wallet-address" = Option<String>, Header, description = "Carteira conectada no navegador")
    )
)]
pub async fn grant_esop(
    State(app_state): State<AppState>,
    wallet: Option<ConnectedWallet>,
    WithRejection(Json(payload), _): WithRejection<Json<EsopGrantPayload>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    // Qualquer falha aqui é 500, inclusive funcionário inexistente
    app_state
        .esop_service
        .notify_grant(&payload)
        .await
        .map_err(|e| {
            tracing::error!(
                employee_id = %payload.employee_id,
                granted_by = wallet.as_ref().map(|w| w.0.as_str()).unwrap_or("-"),
                "ESOP Grant Error: {}",
                e
            );
            ApiError::internal(e.to_string())
        })?;

    Ok((StatusCode::OK, Json(EsopGrantResponse { success: true })))
}
