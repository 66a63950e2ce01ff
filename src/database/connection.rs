//! Configuración de conexión a PostgreSQL
//!
//! Este módulo maneja la conexión a la base de datos y la aplicación
//! del schema al arrancar.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::schema::SCHEMA_STATEMENTS;

/// Conexión a la base de datos
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar y verificar que la base de datos responde
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🔌 Conectando a PostgreSQL en {}", mask_database_url(&config.url));

        let pool = config
            .create_pool()
            .await
            .context("Error conectando a la base de datos")?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .context("La base de datos no responde")?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<()> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(*statement)
                .execute(&self.pool)
                .await
                .context("Error aplicando el schema")?;
        }
        info!("✅ Schema aplicado ({} sentencias)", SCHEMA_STATEMENTS.len());
        Ok(())
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
