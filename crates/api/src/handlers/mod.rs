pub mod activity_logs;
pub mod reference;
pub mod reports;
