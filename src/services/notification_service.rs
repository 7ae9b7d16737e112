// src/services/notification_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    models::notification::{Notification, OutgoingEmail},
    services::{email_templates, mailer::Mailer},
};

// Renderiza o template e envia exatamente um e-mail
#[derive(Clone)]
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    payout_from: String,
    esop_from: String,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>, payout_from: String, esop_from: String) -> Self {
        Self {
            mailer,
            payout_from,
            esop_from,
        }
    }

    pub fn compose(&self, recipient: &str, notification: &Notification) -> OutgoingEmail {
        let from = match notification {
            Notification::PayoutNotice { .. } => &self.payout_from,
            Notification::EsopGrant { .. } => &self.esop_from,
        };

        OutgoingEmail {
            from: from.clone(),
            to: recipient.to_string(),
            subject: email_templates::subject(notification),
            html: email_templates::html(notification),
        }
    }

    pub async fn send(&self, recipient: &str, notification: &Notification) -> Result<(), AppError> {
        let email = self.compose(recipient, notification);
        self.mailer.send(&email).await?;

        tracing::info!(to = %recipient, subject = %email.subject, "📧 E-mail enviado");
        Ok(())
    }
}
