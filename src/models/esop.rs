// src/models/esop.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EsopGrantPayload {
    // Id opaco; qualquer valor que não resolve é "Employee not found"
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub employee_id: String,

    #[schema(example = "10000")]
    pub total_tokens: Decimal,

    #[schema(example = 48)]
    pub duration_months: u32,

    #[schema(example = 12)]
    pub cliff_months: u32,

    // Aceita "2025-01-31" ou RFC 3339
    #[schema(example = "2025-01-31")]
    pub start_date: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EsopGrantResponse {
    pub success: bool,
}
