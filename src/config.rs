// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        stores::{EmployeeStore, SettingsStore},
        EmployeeRepository, OutboxRepository, PayoutRepository, SettingsRepository,
    },
    services::{
        esop_service::EsopService,
        mailer::{Mailer, ResendMailer},
        notification_service::NotificationService,
        outbox_worker::{OutboxSettings, OutboxWorker},
        payout_service::PayoutService,
    },
};

// Configuração lida do ambiente (.env em desenvolvimento)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,

    // Link do portal usado nos e-mails de ESOP
    pub base_url: String,

    pub resend_api_url: String,
    pub resend_api_key: String,
    pub mailer_timeout: Duration,
    pub payout_email_from: String,
    pub esop_email_from: String,

    pub outbox: OutboxSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = OutboxSettings::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,

            base_url: var_or("BASE_URL", "http://localhost:3000"),

            resend_api_url: var_or("RESEND_API_URL", "https://api.resend.com"),
            resend_api_key: env::var("RESEND_API_KEY").context("RESEND_API_KEY deve ser definida")?,
            mailer_timeout: Duration::from_secs(parse_or("MAILER_TIMEOUT_SECS", 10)?),
            payout_email_from: var_or("PAYOUT_EMAIL_FROM", "onboarding@resend.dev"),
            esop_email_from: var_or("ESOP_EMAIL_FROM", "esop-notifications@resend.dev"),

            outbox: OutboxSettings {
                poll_interval: Duration::from_secs(parse_or(
                    "OUTBOX_POLL_SECS",
                    defaults.poll_interval.as_secs(),
                )?),
                batch_size: parse_or("OUTBOX_BATCH_SIZE", defaults.batch_size)?,
                max_attempts: parse_or("OUTBOX_MAX_ATTEMPTS", defaults.max_attempts)?,
                backoff_base_secs: parse_or("OUTBOX_BACKOFF_SECS", defaults.backoff_base_secs)?,
                lease_secs: defaults.lease_secs,
            },
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub employee_store: Arc<dyn EmployeeStore>,
    pub settings_store: Arc<dyn SettingsStore>,
    pub payout_service: PayoutService,
    pub esop_service: EsopService,
}

impl AppState {
    // Monta o gráfico de dependências sobre o pool e o mailer
    pub fn build(pool: PgPool, mailer: Arc<dyn Mailer>, config: &AppConfig) -> (Self, OutboxWorker) {
        let employees: Arc<dyn EmployeeStore> = Arc::new(EmployeeRepository::new(pool.clone()));
        let settings: Arc<dyn SettingsStore> = Arc::new(SettingsRepository::new(pool.clone()));

        let notifier = NotificationService::new(
            mailer,
            config.payout_email_from.clone(),
            config.esop_email_from.clone(),
        );

        let payout_service = PayoutService::new(
            employees.clone(),
            settings.clone(),
            Arc::new(PayoutRepository::new(pool.clone())),
        );
        let esop_service = EsopService::new(
            employees.clone(),
            settings.clone(),
            notifier.clone(),
            config.base_url.clone(),
        );
        let worker = OutboxWorker::new(
            Arc::new(OutboxRepository::new(pool)),
            notifier,
            config.outbox.clone(),
        );

        let state = Self {
            employee_store: employees,
            settings_store: settings,
            payout_service,
            esop_service,
        };

        (state, worker)
    }
}

pub async fn connect_database(config: &AppConfig) -> anyhow::Result<PgPool> {
    // Conecta ao banco de dados, usando '?' para propagar erros
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .context("Falha ao conectar ao banco de dados")?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}

pub fn build_mailer(config: &AppConfig) -> anyhow::Result<Arc<dyn Mailer>> {
    let mailer = ResendMailer::new(&config.resend_api_url, &config.resend_api_key, config.mailer_timeout)
        .context("Falha ao criar o cliente do Resend")?;
    Ok(Arc::new(mailer))
}
