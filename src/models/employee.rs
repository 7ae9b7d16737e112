// src/models/employee.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Funcionário pago pelo sistema
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    // O front-end ainda usa `_id` (herança do formato de documento)
    #[serde(rename = "_id")]
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Ada Lovelace")]
    pub name: String,

    #[schema(example = "ada@example.com")]
    pub email: String,

    #[schema(example = "0x52908400098527886E0F7030069857D2E4169EE7")]
    pub wallet_address: String,

    #[serde(rename = "salaryUSD")]
    #[schema(example = "4200.00")]
    pub salary_usd: Decimal,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,

    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "ada@example.com")]
    pub email: String,

    #[validate(length(min = 1, message = "walletAddress is required"))]
    #[schema(example = "0x52908400098527886E0F7030069857D2E4169EE7")]
    pub wallet_address: String,

    #[serde(rename = "salaryUSD")]
    #[schema(example = "4200.00")]
    pub salary_usd: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub success: bool,
    pub employee: Employee,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub success: bool,
    pub employees: Vec<Employee>,
}
