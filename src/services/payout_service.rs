// src/services/payout_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::{BatchDraft, EmployeeStore, PayoutLedger, SettingsStore},
    models::{
        notification::{Notification, OutboxMessage},
        payout::{
            BatchDetail, BatchReceipt, Payout, PayoutBatch, PayoutLine, PayoutStatus, SkipReason,
            SkippedPayout, TreasuryTransaction, TreasuryTransactionKind, TreasuryTransactionStatus,
        },
    },
};

pub const TREASURY_CURRENCY: &str = "USD";

/// Arredonda para a unidade inteira mais próxima; empates sobem (+0.5 e floor).
/// `None` quando o valor está no limite do `Decimal`.
pub fn round_usd(amount: Decimal) -> Option<Decimal> {
    amount.checked_add(Decimal::new(5, 1)).map(|v| v.floor())
}

// Soma sem pânico; estouro vira erro
fn checked_total<I>(amounts: I) -> Result<Decimal, AppError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| AppError::AmountOverflow("sum exceeds decimal range".into()))
}

#[derive(Clone)]
pub struct PayoutService {
    employees: Arc<dyn EmployeeStore>,
    settings: Arc<dyn SettingsStore>,
    ledger: Arc<dyn PayoutLedger>,
}

impl PayoutService {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        settings: Arc<dyn SettingsStore>,
        ledger: Arc<dyn PayoutLedger>,
    ) -> Self {
        Self {
            employees,
            settings,
            ledger,
        }
    }

    /// Registra um lote de pagamento ligado a `tx_hash`.
    ///
    /// O total do lote e do lançamento no tesouro é a soma dos valores
    /// recebidos. Funcionários inexistentes ficam fora do lote e voltam em
    /// `skipped`. Cada funcionário pago ganha uma notificação na outbox,
    /// gravada na mesma transação que o lote.
    pub async fn record_batch(
        &self,
        tx_hash: &str,
        lines: &[PayoutLine],
        submitted_by: Option<&str>,
    ) -> Result<BatchReceipt, AppError> {
        let now = Utc::now();
        let total_amount = checked_total(lines.iter().map(|line| line.salary_usd))?;

        let batch = PayoutBatch {
            id: Uuid::new_v4(),
            tx_hash: tx_hash.to_string(),
            total_amount,
            submitted_by: submitted_by.map(str::to_string),
            created_at: now,
        };

        let company_name = self.settings.get().await?.organization_name_or_default();

        let mut payouts = Vec::with_capacity(lines.len());
        let mut notifications = Vec::with_capacity(lines.len());
        let mut skipped = Vec::new();

        // Sequencial, na ordem recebida
        for line in lines {
            // Id que não é UUID não pode existir no banco: mesmo tratamento
            let employee = match Uuid::parse_str(line.employee_id.trim()) {
                Ok(id) => self.employees.find_by_id(id).await?,
                Err(_) => None,
            };

            let Some(employee) = employee else {
                tracing::warn!(
                    batch_id = %batch.id,
                    employee_id = %line.employee_id,
                    "Funcionário não encontrado, payout ignorado"
                );
                skipped.push(SkippedPayout {
                    employee_id: line.employee_id.clone(),
                    requested_usd: line.salary_usd,
                    reason: SkipReason::EmployeeNotFound,
                });
                continue;
            };

            let amount_usd = round_usd(line.salary_usd).ok_or_else(|| {
                AppError::AmountOverflow(format!("cannot round {}", line.salary_usd))
            })?;

            let payout = Payout {
                id: Uuid::new_v4(),
                batch_id: batch.id,
                employee_id: employee.id,
                amount_usd,
                status: PayoutStatus::Completed,
            };

            notifications.push(OutboxMessage::pending(
                employee.email.clone(),
                Notification::PayoutNotice {
                    employee_name: employee.name.clone(),
                    amount_usd: payout.amount_usd,
                    tx_hash: tx_hash.to_string(),
                    wallet_address: employee.wallet_address.clone(),
                    company_name: company_name.clone(),
                },
                now,
            ));
            payouts.push(payout);
        }

        let paid_amount = checked_total(payouts.iter().map(|p| p.amount_usd))?;

        let treasury = TreasuryTransaction {
            id: Uuid::new_v4(),
            kind: TreasuryTransactionKind::Withdrawal,
            amount: total_amount,
            currency: TREASURY_CURRENCY.to_string(),
            description: format!(
                "Payout batch {} - {} employee(s) paid out",
                batch.id,
                payouts.len()
            ),
            tx_hash: tx_hash.to_string(),
            status: TreasuryTransactionStatus::Completed,
            created_at: now,
        };

        let draft = BatchDraft {
            batch,
            payouts,
            treasury,
            notifications,
        };
        self.ledger.commit_batch(&draft).await?;

        tracing::info!(
            batch_id = %draft.batch.id,
            tx_hash = %tx_hash,
            paid = draft.payouts.len(),
            skipped = skipped.len(),
            total = %total_amount,
            "✅ Lote de pagamento registrado"
        );

        Ok(BatchReceipt {
            batch: draft.batch,
            payouts: draft.payouts,
            skipped,
            paid_amount,
        })
    }

    pub async fn list_batches(&self) -> Result<Vec<PayoutBatch>, AppError> {
        self.ledger.list_batches().await
    }

    pub async fn get_batch(&self, id: Uuid) -> Result<BatchDetail, AppError> {
        self.ledger
            .find_batch(id)
            .await?
            .ok_or(AppError::BatchNotFound)
    }
}
