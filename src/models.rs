pub mod employee;
pub mod settings;
pub mod payout;
pub mod notification;
pub mod esop;
