// src/db/payout_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{db_utils::rows_per_insert, error::AppError},
    db::{
        outbox_repo::OutboxRepository,
        stores::{BatchDraft, PayoutLedger},
    },
    models::payout::{BatchDetail, Payout, PayoutBatch, TreasuryTransaction},
};

#[derive(Clone)]
pub struct PayoutRepository {
    pool: PgPool,
    outbox: OutboxRepository,
}

impl PayoutRepository {
    pub fn new(pool: PgPool) -> Self {
        let outbox = OutboxRepository::new(pool.clone());
        Self { pool, outbox }
    }

    // =========================================================================
    //  LOTES
    // =========================================================================

    pub async fn insert_batch<'e, E>(&self, executor: E, batch: &PayoutBatch) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO payout_batches (id, tx_hash, total_amount, submitted_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
            .bind(batch.id)
            .bind(&batch.tx_hash)
            .bind(batch.total_amount)
            .bind(batch.submitted_by.as_deref())
            .bind(batch.created_at)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn get_all_batches<'e, E>(&self, executor: E) -> Result<Vec<PayoutBatch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batches = sqlx::query_as::<_, PayoutBatch>(
            r#"
            SELECT id, tx_hash, total_amount, submitted_by, created_at
            FROM payout_batches
            ORDER BY created_at DESC, id DESC
            "#,
        )
            .fetch_all(executor)
            .await?;

        Ok(batches)
    }

    pub async fn get_batch<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<PayoutBatch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, PayoutBatch>(
            "SELECT id, tx_hash, total_amount, submitted_by, created_at FROM payout_batches WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(batch)
    }

    // =========================================================================
    //  PAYOUTS
    // =========================================================================

    // INSERT multi-linha em blocos; `position` guarda a ordem da requisição
    pub async fn insert_payouts(&self, conn: &mut PgConnection, payouts: &[Payout]) -> Result<(), AppError> {
        const BINDS_PER_ROW: usize = 6;
        let rows = rows_per_insert(BINDS_PER_ROW);

        for (chunk_index, chunk) in payouts.chunks(rows).enumerate() {
            let offset = chunk_index * rows;

            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO payouts (id, batch_id, employee_id, amount_usd, status, position) ",
            );
            builder.push_values(chunk.iter().enumerate(), |mut row, (i, payout)| {
                row.push_bind(payout.id)
                    .push_bind(payout.batch_id)
                    .push_bind(payout.employee_id)
                    .push_bind(payout.amount_usd)
                    .push_bind(payout.status)
                    .push_bind((offset + i) as i32);
            });

            builder.build().execute(&mut *conn).await?;
        }

        Ok(())
    }

    pub async fn get_payouts_for_batch<'e, E>(
        &self,
        executor: E,
        batch_id: Uuid,
    ) -> Result<Vec<Payout>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payouts = sqlx::query_as::<_, Payout>(
            r#"
            SELECT id, batch_id, employee_id, amount_usd, status
            FROM payouts
            WHERE batch_id = $1
            ORDER BY position ASC
            "#,
        )
            .bind(batch_id)
            .fetch_all(executor)
            .await?;

        Ok(payouts)
    }

    // =========================================================================
    //  TESOURO
    // =========================================================================

    pub async fn insert_treasury_transaction<'e, E>(
        &self,
        executor: E,
        tx: &TreasuryTransaction,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO treasury_transactions (
                id, kind, amount, currency, description, tx_hash, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
            .bind(tx.id)
            .bind(tx.kind)
            .bind(tx.amount)
            .bind(&tx.currency)
            .bind(&tx.description)
            .bind(&tx.tx_hash)
            .bind(tx.status)
            .bind(tx.created_at)
            .execute(executor)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PayoutLedger for PayoutRepository {
    async fn commit_batch(&self, draft: &BatchDraft) -> Result<(), AppError> {
        // Lote, payouts, tesouro e outbox: tudo ou nada
        let mut tx = self.pool.begin().await?;

        self.insert_batch(&mut *tx, &draft.batch).await?;
        self.insert_payouts(&mut tx, &draft.payouts).await?;
        self.insert_treasury_transaction(&mut *tx, &draft.treasury).await?;
        self.outbox.enqueue_many(&mut tx, &draft.notifications).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_batches(&self) -> Result<Vec<PayoutBatch>, AppError> {
        self.get_all_batches(&self.pool).await
    }

    async fn find_batch(&self, id: Uuid) -> Result<Option<BatchDetail>, AppError> {
        let Some(batch) = self.get_batch(&self.pool, id).await? else {
            return Ok(None);
        };
        let payouts = self.get_payouts_for_batch(&self.pool, id).await?;

        Ok(Some(BatchDetail { batch, payouts }))
    }
}
