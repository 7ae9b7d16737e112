// src/handlers/payouts.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::wallet::ConnectedWallet,
    models::payout::{BatchDetail, BatchReceipt, CreateBatchPayload, PayoutBatch},
};

// Mensagem única para qualquer falha ao gravar o lote
pub const BATCH_FAILURE_MESSAGE: &str = "Failed to create payout batch";

// POST /api/payouts/batch
#[utoipa::path(
    post,
    path = "/api/payouts/batch",
    tag = "Payouts",
    request_body = CreateBatchPayload,
    responses(
        (status = 201, description = "Lote registrado", body = BatchReceipt),
        (status = 400, description = "JSON inválido ou carteira malformada"),
        (status = 500, description = "Falha ao gravar o lote. Corpo: `{\"success\": false, \"error\": \"Failed to create payout batch\"}`")
    ),
    params(
        ("x-wallet-address" = Option<String>, Header, description = "Carteira conectada no navegador")
    )
)]
pub async fn create_batch(
    State(app_state): State<AppState>,
    wallet: Option<ConnectedWallet>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateBatchPayload>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let submitted_by = wallet.as_ref().map(|w| w.0.as_str());

    let receipt = app_state
        .payout_service
        .record_batch(&payload.tx_hash, &payload.payouts, submitted_by)
        .await
        .map_err(|e| {
            tracing::error!(tx_hash = %payload.tx_hash, "🔥 Falha ao criar lote de pagamento: {}", e);
            ApiError::internal(BATCH_FAILURE_MESSAGE)
        })?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

// GET /api/payouts/batch
#[utoipa::path(
    get,
    path = "/api/payouts/batch",
    tag = "Payouts",
    responses(
        (status = 200, description = "Lotes, mais recentes primeiro", body = Vec<PayoutBatch>)
    )
)]
pub async fn list_batches(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let batches = app_state
        .payout_service
        .list_batches()
        .await
        .map_err(AppError::to_api_error)?;

    Ok((StatusCode::OK, Json(batches)))
}

// GET /api/payouts/batch/{id}
#[utoipa::path(
    get,
    path = "/api/payouts/batch/{id}",
    tag = "Payouts",
    responses(
        (status = 200, description = "Lote com seus payouts", body = BatchDetail),
        (status = 404, description = "Lote não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do lote")
    )
)]
pub async fn get_batch(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .payout_service
        .get_batch(id)
        .await
        .map_err(AppError::to_api_error)?;

    Ok((StatusCode::OK, Json(detail)))
}
