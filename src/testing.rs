// src/testing.rs
//
// Stores e mailer em memória para os testes dos serviços e handlers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::{BatchDraft, EmployeeStore, OutboxStore, PayoutLedger, SettingsStore},
    models::{
        employee::{CreateEmployeePayload, Employee},
        notification::{OutboxMessage, OutboxStatus, OutgoingEmail},
        payout::{BatchDetail, Payout, PayoutBatch, TreasuryTransaction},
        settings::{Settings, UpdateSettingsRequest},
    },
    config::AppState,
    services::{
        esop_service::EsopService, mailer::Mailer, notification_service::NotificationService,
        payout_service::PayoutService,
    },
};

// AppState completo sobre os fakes em memória
pub fn app_state(store: Arc<MemoryStore>, mailer: Arc<RecordingMailer>) -> AppState {
    let notifier = NotificationService::new(
        mailer,
        "onboarding@resend.dev".into(),
        "esop-notifications@resend.dev".into(),
    );

    AppState {
        employee_store: store.clone(),
        settings_store: store.clone(),
        payout_service: PayoutService::new(store.clone(), store.clone(), store.clone()),
        esop_service: EsopService::new(
            store.clone(),
            store,
            notifier,
            "http://localhost:3000".into(),
        ),
    }
}

#[derive(Default)]
struct Inner {
    employees: Vec<Employee>,
    settings: Settings,
    batches: Vec<PayoutBatch>,
    payouts: Vec<Payout>,
    treasury: Vec<TreasuryTransaction>,
    outbox: Vec<OutboxMessage>,
    fail_commits: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn add_employee(&self, name: &str, email: &str, wallet_address: &str) -> Employee {
        let employee = Employee {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            wallet_address: wallet_address.into(),
            salary_usd: Decimal::from(1000),
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().employees.push(employee.clone());
        employee
    }

    pub fn set_organization_name(&self, name: &str) {
        self.inner.lock().unwrap().settings = Settings {
            organization_name: Some(name.into()),
            updated_at: Some(Utc::now()),
        };
    }

    pub fn fail_commits(&self, fail: bool) {
        self.inner.lock().unwrap().fail_commits = fail;
    }

    pub fn insert_batch(&self, tx_hash: &str, created_at: DateTime<Utc>) -> PayoutBatch {
        let batch = PayoutBatch {
            id: Uuid::new_v4(),
            tx_hash: tx_hash.into(),
            total_amount: Decimal::ZERO,
            submitted_by: None,
            created_at,
        };
        self.inner.lock().unwrap().batches.push(batch.clone());
        batch
    }

    pub fn push_outbox(&self, message: OutboxMessage) {
        self.inner.lock().unwrap().outbox.push(message);
    }

    pub fn batches(&self) -> Vec<PayoutBatch> {
        self.inner.lock().unwrap().batches.clone()
    }

    pub fn payouts(&self) -> Vec<Payout> {
        self.inner.lock().unwrap().payouts.clone()
    }

    pub fn treasury(&self) -> Vec<TreasuryTransaction> {
        self.inner.lock().unwrap().treasury.clone()
    }

    pub fn outbox(&self) -> Vec<OutboxMessage> {
        self.inner.lock().unwrap().outbox.clone()
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn create(&self, input: &CreateEmployeePayload) -> Result<Employee, AppError> {
        let employee = Employee {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            wallet_address: input.wallet_address.clone(),
            salary_usd: input.salary_usd,
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().employees.push(employee.clone());
        Ok(employee)
    }

    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.inner.lock().unwrap().employees.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.employees.iter().find(|e| e.id == id).cloned())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self) -> Result<Settings, AppError> {
        Ok(self.inner.lock().unwrap().settings.clone())
    }

    async fn upsert(&self, input: &UpdateSettingsRequest) -> Result<Settings, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.settings = Settings {
            organization_name: input.organization_name.clone(),
            updated_at: Some(Utc::now()),
        };
        Ok(inner.settings.clone())
    }
}

#[async_trait]
impl PayoutLedger for MemoryStore {
    async fn commit_batch(&self, draft: &BatchDraft) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_commits {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }

        inner.batches.push(draft.batch.clone());
        inner.payouts.extend(draft.payouts.iter().cloned());
        inner.treasury.push(draft.treasury.clone());
        inner.outbox.extend(draft.notifications.iter().cloned());
        Ok(())
    }

    async fn list_batches(&self) -> Result<Vec<PayoutBatch>, AppError> {
        let mut batches = self.inner.lock().unwrap().batches.clone();
        batches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(batches)
    }

    async fn find_batch(&self, id: Uuid) -> Result<Option<BatchDetail>, AppError> {
        let inner = self.inner.lock().unwrap();
        let Some(batch) = inner.batches.iter().find(|b| b.id == id).cloned() else {
            return Ok(None);
        };
        let payouts = inner
            .payouts
            .iter()
            .filter(|p| p.batch_id == id)
            .cloned()
            .collect();

        Ok(Some(BatchDetail { batch, payouts }))
    }
}

#[async_trait]
impl OutboxStore for MemoryStore {
    async fn claim_due(
        &self,
        now: DateTime<Utc>,
        lease_until: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<OutboxMessage>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let mut due: Vec<&mut OutboxMessage> = inner
            .outbox
            .iter_mut()
            .filter(|m| m.status == OutboxStatus::Pending && m.next_attempt_at <= now)
            .collect();
        due.sort_by_key(|m| m.created_at);

        Ok(due
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|m| {
                m.next_attempt_at = lease_until;
                m.clone()
            })
            .collect())
    }

    async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(m) = inner.outbox.iter_mut().find(|m| m.id == id) {
            m.status = OutboxStatus::Sent;
            m.attempts += 1;
            m.sent_at = Some(sent_at);
        }
        Ok(())
    }

    async fn reschedule(
        &self,
        id: Uuid,
        attempts: i32,
        next_attempt_at: DateTime<Utc>,
        error: &str,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(m) = inner.outbox.iter_mut().find(|m| m.id == id) {
            m.attempts = attempts;
            m.next_attempt_at = next_attempt_at;
            m.last_error = Some(error.into());
        }
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, attempts: i32, error: &str) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(m) = inner.outbox.iter_mut().find(|m| m.id == id) {
            m.status = OutboxStatus::Failed;
            m.attempts = attempts;
            m.last_error = Some(error.into());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    failure: Option<String>,
}

impl RecordingMailer {
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Mutex::default(),
            failure: Some(message.into()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), AppError> {
        if let Some(message) = &self.failure {
            return Err(AppError::MailerError(message.clone()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
