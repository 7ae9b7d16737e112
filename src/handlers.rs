pub mod employees;
pub mod payouts;
pub mod esops;
pub mod settings;
