// src/models/notification.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

// Template + parâmetros. Também é o payload gravado na outbox (JSONB).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Notification {
    PayoutNotice {
        employee_name: String,
        amount_usd: Decimal,
        tx_hash: String,
        wallet_address: String,
        company_name: String,
    },
    EsopGrant {
        employee_name: String,
        company_name: String,
        total_tokens: Decimal,
        duration_months: u32,
        cliff_months: u32,
        start_date: String,
        portal_url: String,
    },
}

// E-mail já renderizado, pronto para o provedor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "outbox_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutboxStatus {
    Pending,
    Sent,
    Failed,
}

// Notificação pendente na fila durável
#[derive(Debug, Clone, FromRow)]
pub struct OutboxMessage {
    pub id: Uuid,
    pub recipient: String,
    pub notification: Json<Notification>,
    pub status: OutboxStatus,
    pub attempts: i32,
    pub next_attempt_at: DateTime<Utc>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl OutboxMessage {
    pub fn pending(recipient: impl Into<String>, notification: Notification, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.into(),
            notification: Json(notification),
            status: OutboxStatus::Pending,
            attempts: 0,
            next_attempt_at: now,
            last_error: None,
            created_at: now,
            sent_at: None,
        }
    }
}
