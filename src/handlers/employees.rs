// src/handlers/employees.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    models::employee::{CreateEmployeePayload, EmployeeListResponse, EmployeeResponse},
};

// POST /api/employees
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = CreateEmployeePayload,
    responses(
        (status = 200, description = "Funcionário criado", body = EmployeeResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 500, description = "Erro de persistência (mensagem do banco)")
    )
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateEmployeePayload>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error())?;

    let employee = app_state
        .employee_store
        .create(&payload)
        .await
        .map_err(AppError::to_api_error)?;

    tracing::info!(employee_id = %employee.id, "Funcionário criado");

    Ok((StatusCode::OK, Json(EmployeeResponse { success: true, employee })))
}

// GET /api/employees
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "Lista de funcionários", body = EmployeeListResponse),
        (status = 500, description = "Erro de persistência")
    )
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let employees = app_state
        .employee_store
        .list()
        .await
        .map_err(AppError::to_api_error)?;

    Ok((StatusCode::OK, Json(EmployeeListResponse { success: true, employees })))
}
