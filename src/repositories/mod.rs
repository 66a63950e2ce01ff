pub mod account_repository;
pub mod checkin_repository;
pub mod dashboard_repository;
pub mod monthly_pass_repository;
pub mod pricing_repository;
pub mod user_repository;
