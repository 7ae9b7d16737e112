// src/db/settings_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    db::stores::SettingsStore,
    models::settings::{Settings, UpdateSettingsRequest},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_settings<'e, E>(&self, executor: E) -> Result<Settings, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // A linha única pode ainda não existir: tratamos "Not Found" como "Vazio".
        let settings = sqlx::query_as::<_, Settings>(
            "SELECT organization_name, updated_at FROM settings WHERE id = TRUE",
        )
            .fetch_optional(executor)
            .await?;

        Ok(settings.unwrap_or_default())
    }

    pub async fn update_settings<'e, E>(
        &self,
        executor: E,
        input: &UpdateSettingsRequest,
    ) -> Result<Settings, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // UPSERT (Insert or Update)
        let settings = sqlx::query_as::<_, Settings>(
            r#"
            INSERT INTO settings (id, organization_name, updated_at)
            VALUES (TRUE, $1, NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                organization_name = EXCLUDED.organization_name,
                updated_at = NOW()
            RETURNING organization_name, updated_at
            "#,
        )
            .bind(input.organization_name.as_deref())
            .fetch_one(executor)
            .await?;

        Ok(settings)
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn get(&self) -> Result<Settings, AppError> {
        self.get_settings(&self.pool).await
    }

    async fn upsert(&self, input: &UpdateSettingsRequest) -> Result<Settings, AppError> {
        self.update_settings(&self.pool, input).await
    }
}
