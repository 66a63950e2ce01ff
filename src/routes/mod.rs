pub mod auth_routes;
pub mod checkin_routes;
pub mod dashboard_routes;
pub mod monthly_pass_routes;
pub mod pricing_routes;
pub mod staff_routes;
