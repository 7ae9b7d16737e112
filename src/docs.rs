// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Employees ---
        handlers::employees::create_employee,
        handlers::employees::list_employees,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- Payouts ---
        handlers::payouts::create_batch,
        handlers::payouts::list_batches,
        handlers::payouts::get_batch,

        // --- ESOP ---
        handlers::esops::grant_esop,
    ),
    components(
        schemas(
            // --- Employees ---
            models::employee::Employee,
            models::employee::CreateEmployeePayload,
            models::employee::EmployeeResponse,
            models::employee::EmployeeListResponse,

            // --- Settings ---
            models::settings::Settings,
            models::settings::UpdateSettingsRequest,

            // --- Payouts ---
            models::payout::PayoutStatus,
            models::payout::TreasuryTransactionKind,
            models::payout::TreasuryTransactionStatus,
            models::payout::PayoutBatch,
            models::payout::Payout,
            models::payout::TreasuryTransaction,
            models::payout::PayoutLine,
            models::payout::CreateBatchPayload,
            models::payout::SkipReason,
            models::payout::SkippedPayout,
            models::payout::BatchReceipt,
            models::payout::BatchDetail,

            // --- ESOP ---
            models::esop::EsopGrantPayload,
            models::esop::EsopGrantResponse,
        )
    ),
    tags(
        (name = "Employees", description = "Cadastro de Funcionários"),
        (name = "Settings", description = "Configuração da Organização"),
        (name = "Payouts", description = "Lotes de Pagamento e Tesouro"),
        (name = "ESOP", description = "Notificações de Concessão de Ações")
    )
)]
pub struct ApiDoc;
