// src/services/outbox_worker.rs

use std::{sync::Arc, time::Duration};

use chrono::{TimeDelta, Utc};
use tokio::sync::watch;

use crate::{
    common::error::AppError,
    db::stores::OutboxStore,
    services::notification_service::NotificationService,
};

// Teto do backoff entre tentativas
const MAX_BACKOFF_SECS: i64 = 3600;

#[derive(Debug, Clone)]
pub struct OutboxSettings {
    pub poll_interval: Duration,
    pub batch_size: i64,
    pub max_attempts: i32,
    pub backoff_base_secs: i64,
    // Tempo que uma mensagem reservada fica invisível para outros workers
    pub lease_secs: i64,
}

impl Default for OutboxSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            batch_size: 20,
            max_attempts: 5,
            backoff_base_secs: 30,
            lease_secs: 300,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent: usize,
    pub retried: usize,
    pub failed: usize,
}

/// `base * 2^(attempts-1)`, limitado a uma hora.
pub fn backoff_delay(base_secs: i64, attempts: i32) -> TimeDelta {
    let exponent = (attempts.max(1) - 1).min(20) as u32;
    let secs = base_secs
        .saturating_mul(1_i64 << exponent)
        .min(MAX_BACKOFF_SECS);
    TimeDelta::seconds(secs)
}

// Consome a outbox e entrega as notificações pendentes
pub struct OutboxWorker {
    store: Arc<dyn OutboxStore>,
    notifier: NotificationService,
    settings: OutboxSettings,
}

impl OutboxWorker {
    pub fn new(store: Arc<dyn OutboxStore>, notifier: NotificationService, settings: OutboxSettings) -> Self {
        Self {
            store,
            notifier,
            settings,
        }
    }

    pub async fn run_once(&self) -> Result<DeliveryReport, AppError> {
        let now = Utc::now();
        let lease_until = now + TimeDelta::seconds(self.settings.lease_secs);
        let messages = self
            .store
            .claim_due(now, lease_until, self.settings.batch_size)
            .await?;

        let mut report = DeliveryReport::default();

        for message in messages {
            let attempt = message.attempts + 1;

            match self.notifier.send(&message.recipient, &message.notification.0).await {
                Ok(()) => {
                    self.store.mark_sent(message.id, Utc::now()).await?;
                    report.sent += 1;
                }
                Err(e) if attempt >= self.settings.max_attempts => {
                    tracing::error!(
                        outbox_id = %message.id,
                        to = %message.recipient,
                        attempts = attempt,
                        "🔥 Notificação descartada após esgotar tentativas: {}",
                        e
                    );
                    self.store.mark_failed(message.id, attempt, &e.to_string()).await?;
                    report.failed += 1;
                }
                Err(e) => {
                    let next_attempt_at = Utc::now() + backoff_delay(self.settings.backoff_base_secs, attempt);
                    tracing::warn!(
                        outbox_id = %message.id,
                        to = %message.recipient,
                        attempts = attempt,
                        retry_at = %next_attempt_at,
                        "Falha ao enviar notificação: {}",
                        e
                    );
                    self.store
                        .reschedule(message.id, attempt, next_attempt_at, &e.to_string())
                        .await?;
                    report.retried += 1;
                }
            }
        }

        Ok(report)
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.settings.poll_interval);
        tracing::info!("📬 Worker da outbox iniciado");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.run_once().await {
                        Ok(report) if report != DeliveryReport::default() => {
                            tracing::info!(
                                sent = report.sent,
                                retried = report.retried,
                                failed = report.failed,
                                "Outbox processada"
                            );
                        }
                        Ok(_) => {}
                        Err(e) => tracing::error!("Erro ao processar a outbox: {}", e),
                    }
                }
                _ = shutdown.changed() => break,
            }
        }

        tracing::info!("Worker da outbox encerrado");
    }
}
