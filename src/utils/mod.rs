//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y generación de tokens de sesión.

pub mod errors;
pub mod jwt;
pub mod session_token;
pub mod validation;
