// src/db/stores.rs
//
// Contratos entre os serviços e a persistência. Os repositórios Postgres
// implementam estes traits; os testes usam as versões em memória.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        employee::{CreateEmployeePayload, Employee},
        notification::OutboxMessage,
        payout::{BatchDetail, Payout, PayoutBatch, TreasuryTransaction},
        settings::{Settings, UpdateSettingsRequest},
    },
};

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn create(&self, input: &CreateEmployeePayload) -> Result<Employee, AppError>;
    async fn list(&self) -> Result<Vec<Employee>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Retorna um registro vazio quando a organização nunca foi configurada.
    async fn get(&self) -> Result<Settings, AppError>;
    async fn upsert(&self, input: &UpdateSettingsRequest) -> Result<Settings, AppError>;
}

/// Tudo o que um lote grava. Persistido como uma unidade.
#[derive(Debug, Clone)]
pub struct BatchDraft {
    pub batch: PayoutBatch,
    pub payouts: Vec<Payout>,
    pub treasury: TreasuryTransaction,
    pub notifications: Vec<OutboxMessage>,
}

#[async_trait]
pub trait PayoutLedger: Send + Sync {
    /// Grava lote, payouts, lançamento do tesouro e outbox atomicamente.
    async fn commit_batch(&self, draft: &BatchDraft) -> Result<(), AppError>;

    /// Mais recentes primeiro.
    async fn list_batches(&self) -> Result<Vec<PayoutBatch>, AppError>;

    async fn find_batch(&self, id: Uuid) -> Result<Option<BatchDetail>, AppError>;
}

#[async_trait]
pub trait OutboxStore: Send + Sync {
    /// Reserva até `limit` mensagens vencidas, empurrando `next_attempt_at`
    /// para `lease_until` para que outro worker não as pegue.
    async fn claim_due(
        &self,
        now: DateTime<Utc>,
        lease_until: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<OutboxMessage>, AppError>;

    async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> Result<(), AppError>;

    async fn reschedule(
        &self,
        id: Uuid,
        attempts: i32,
        next_attempt_at: DateTime<Utc>,
        error: &str,
    ) -> Result<(), AppError>;

    async fn mark_failed(&self, id: Uuid, attempts: i32, error: &str) -> Result<(), AppError>;
}
