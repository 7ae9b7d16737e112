// src/db/outbox_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Executor, PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{db_utils::rows_per_insert, error::AppError},
    db::stores::OutboxStore,
    models::notification::{OutboxMessage, OutboxStatus},
};

#[derive(Clone)]
pub struct OutboxRepository {
    pool: PgPool,
}

impl OutboxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Chamado dentro da transação do lote, em blocos abaixo do limite de binds
    pub async fn enqueue_many(
        &self,
        conn: &mut PgConnection,
        messages: &[OutboxMessage],
    ) -> Result<(), AppError> {
        const BINDS_PER_ROW: usize = 7;

        for chunk in messages.chunks(rows_per_insert(BINDS_PER_ROW)) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO notification_outbox (id, recipient, notification, status, attempts, next_attempt_at, created_at) ",
            );
            builder.push_values(chunk, |mut row, message| {
                row.push_bind(message.id)
                    .push_bind(message.recipient.clone())
                    .push_bind(message.notification.clone())
                    .push_bind(message.status)
                    .push_bind(message.attempts)
                    .push_bind(message.next_attempt_at)
                    .push_bind(message.created_at);
            });

            builder.build().execute(&mut *conn).await?;
        }

        Ok(())
    }

    pub async fn claim_due_messages<'e, E>(
        &self,
        executor: E,
        now: DateTime<Utc>,
        lease_until: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<OutboxMessage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // SKIP LOCKED: dois workers nunca pegam a mesma linha
        let messages = sqlx::query_as::<_, OutboxMessage>(
            r#"
            UPDATE notification_outbox
            SET next_attempt_at = $3
            WHERE id IN (
                SELECT id FROM notification_outbox
                WHERE status = 'pending' AND next_attempt_at <= $1
                ORDER BY created_at ASC
                LIMIT $2
                FOR UPDATE SKIP LOCKED
            )
            RETURNING id, recipient, notification, status, attempts,
                      next_attempt_at, last_error, created_at, sent_at
            "#,
        )
            .bind(now)
            .bind(limit)
            .bind(lease_until)
            .fetch_all(executor)
            .await?;

        Ok(messages)
    }

    pub async fn update_delivery<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: OutboxStatus,
        attempts: i32,
        next_attempt_at: Option<DateTime<Utc>>,
        last_error: Option<&str>,
        sent_at: Option<DateTime<Utc>>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE notification_outbox
            SET status = $2,
                attempts = $3,
                next_attempt_at = COALESCE($4, next_attempt_at),
                last_error = COALESCE($5, last_error),
                sent_at = $6
            WHERE id = $1
            "#,
        )
            .bind(id)
            .bind(status)
            .bind(attempts)
            .bind(next_attempt_at)
            .bind(last_error)
            .bind(sent_at)
            .execute(executor)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl OutboxStore for OutboxRepository {
    async fn claim_due(
        &self,
        now: DateTime<Utc>,
        lease_until: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<OutboxMessage>, AppError> {
        self.claim_due_messages(&self.pool, now, lease_until, limit).await
    }

    async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> Result<(), AppError> {
        // A tentativa que deu certo também conta em `attempts`
        sqlx::query(
            "UPDATE notification_outbox SET status = $2, attempts = attempts + 1, sent_at = $3 WHERE id = $1",
        )
            .bind(id)
            .bind(OutboxStatus::Sent)
            .bind(sent_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn reschedule(
        &self,
        id: Uuid,
        attempts: i32,
        next_attempt_at: DateTime<Utc>,
        error: &str,
    ) -> Result<(), AppError> {
        self.update_delivery(
            &self.pool,
            id,
            OutboxStatus::Pending,
            attempts,
            Some(next_attempt_at),
            Some(error),
            None,
        )
            .await
    }

    async fn mark_failed(&self, id: Uuid, attempts: i32, error: &str) -> Result<(), AppError> {
        self.update_delivery(&self.pool, id, OutboxStatus::Failed, attempts, None, Some(error), None)
            .await
    }
}
