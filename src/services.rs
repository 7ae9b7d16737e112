pub mod mailer;
pub mod email_templates;
pub mod notification_service;
pub mod payout_service;
pub mod esop_service;
pub mod outbox_worker;
