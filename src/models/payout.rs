// src/models/payout.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

// Não existe transição depois da criação: todo payout nasce "completed"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payout_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "treasury_tx_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TreasuryTransactionKind {
    Deposit,
    Withdrawal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "treasury_tx_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TreasuryTransactionStatus {
    Pending,
    Completed,
    Failed,
}

// --- Structs ---

// Uma rodada de pagamento ligada a uma transação on-chain
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayoutBatch {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[schema(example = "0xabc")]
    pub tx_hash: String,

    // Soma dos valores recebidos na requisição (antes do arredondamento)
    #[schema(example = "2000.0")]
    pub total_amount: Decimal,

    // Carteira conectada que enviou o lote, quando informada
    pub submitted_by: Option<String>,

    pub created_at: DateTime<Utc>,
}

// A parte de um funcionário dentro do lote
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub batch_id: Uuid,
    pub employee_id: Uuid,

    #[serde(rename = "amountUSD")]
    #[schema(example = "1000")]
    pub amount_usd: Decimal,

    pub status: PayoutStatus,
}

// Lançamento no livro do tesouro
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryTransaction {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(rename = "type")]
    pub kind: TreasuryTransactionKind,

    pub amount: Decimal,

    #[schema(example = "USD")]
    pub currency: String,

    pub description: String,
    pub tx_hash: String,
    pub status: TreasuryTransactionStatus,
    pub created_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PayoutLine {
    // Id opaco vindo do front-end; o que não resolve vira `skipped`
    #[serde(rename = "_id")]
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub employee_id: String,

    #[serde(rename = "salaryUSD")]
    #[schema(example = "1000.4")]
    pub salary_usd: Decimal,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchPayload {
    #[schema(example = "0xabc")]
    pub tx_hash: String,

    #[serde(default)]
    pub payouts: Vec<PayoutLine>,
}

// --- Respostas ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EmployeeNotFound,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkippedPayout {
    // Exatamente como veio na requisição
    pub employee_id: String,

    #[serde(rename = "requestedUSD")]
    pub requested_usd: Decimal,

    pub reason: SkipReason,
}

// Resultado de um lote: o que foi pago, o que ficou de fora e os totais
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchReceipt {
    pub batch: PayoutBatch,
    pub payouts: Vec<Payout>,
    pub skipped: Vec<SkippedPayout>,

    // Soma dos payouts gravados (já arredondados)
    pub paid_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchDetail {
    pub batch: PayoutBatch,
    pub payouts: Vec<Payout>,
}
