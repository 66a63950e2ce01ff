//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod account;
pub mod checkin;
pub mod monthly_pass;
pub mod pricing;
pub mod user;
