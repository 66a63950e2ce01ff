pub mod api_response;
pub mod auth_dto;
pub mod checkin_dto;
pub mod dashboard_dto;
pub mod monthly_pass_dto;
pub mod pricing_dto;
pub mod staff_dto;

pub use api_response::ApiResponse;
