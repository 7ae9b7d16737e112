// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Nome usado nos e-mails quando a organização ainda não foi configurada
pub const DEFAULT_ORGANIZATION_NAME: &str = "Your Company";

// Configuração única da organização (singleton)
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[schema(example = "Acme Labs")]
    pub organization_name: Option<String>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Settings {
    pub fn organization_name_or_default(&self) -> String {
        self.organization_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_ORGANIZATION_NAME)
            .to_string()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[schema(example = "Acme Labs")]
    pub organization_name: Option<String>,
}
