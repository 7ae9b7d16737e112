// src/services/esop_service.rs

use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::{EmployeeStore, SettingsStore},
    models::{esop::EsopGrantPayload, notification::Notification},
    services::notification_service::NotificationService,
};

#[derive(Clone)]
pub struct EsopService {
    employees: Arc<dyn EmployeeStore>,
    settings: Arc<dyn SettingsStore>,
    notifier: NotificationService,
    portal_url: String,
}

impl EsopService {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        settings: Arc<dyn SettingsStore>,
        notifier: NotificationService,
        portal_url: String,
    ) -> Self {
        Self {
            employees,
            settings,
            notifier,
            portal_url,
        }
    }

    // Envio síncrono: qualquer falha volta para o chamador
    pub async fn notify_grant(&self, grant: &EsopGrantPayload) -> Result<(), AppError> {
        let employee_id =
            Uuid::parse_str(grant.employee_id.trim()).map_err(|_| AppError::EmployeeNotFound)?;
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(AppError::EmployeeNotFound)?;

        let company_name = self.settings.get().await?.organization_name_or_default();
        let start_date = format_start_date(&grant.start_date)?;

        let notification = Notification::EsopGrant {
            employee_name: employee.name.clone(),
            company_name,
            total_tokens: grant.total_tokens,
            duration_months: grant.duration_months,
            cliff_months: grant.cliff_months,
            start_date,
            portal_url: self.portal_url.clone(),
        };

        self.notifier.send(&employee.email, &notification).await?;

        tracing::info!(employee_id = %employee.id, "ESOP notificado");
        Ok(())
    }
}

// "2025-01-31" ou RFC 3339 -> "1/31/2025"
fn format_start_date(raw: &str) -> Result<String, AppError> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::InvalidStartDate(raw.to_string()))?;

    Ok(date.format("%-m/%-d/%Y").to_string())
}
