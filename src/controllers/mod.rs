pub mod auth_controller;
pub mod checkin_controller;
pub mod dashboard_controller;
pub mod monthly_pass_controller;
pub mod pricing_controller;
pub mod staff_controller;
