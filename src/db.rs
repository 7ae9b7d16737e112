pub mod stores;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod payout_repo;
pub use payout_repo::PayoutRepository;
pub mod outbox_repo;
pub use outbox_repo::OutboxRepository;
