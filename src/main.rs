use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn, Level};

use parking_manager::config::{DatabaseConfig, EnvironmentConfig};
use parking_manager::create_app;
use parking_manager::database::DatabaseConnection;
use parking_manager::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🅿️  Parking Manager API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    if config.is_development() {
        warn!("⚠️  Modo desarrollo: JWT_SECRET puede ser el valor por defecto");
    }

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&DatabaseConfig::from(&config)).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };

    if config.auto_migrate {
        db_connection.run_migrations().await?;
    } else {
        warn!("⚠️  AUTO_MIGRATE desactivado, se asume el schema existente");
    }

    let pool = db_connection.pool().clone();
    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let app_state = AppState::new(pool, config)?;
    let app = create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/register - Registrar aparcamiento");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("👥 Staff: GET/POST /api/staff, PUT/DELETE /api/staff/:id");
    info!("💶 Pricing: GET/PUT /api/pricing");
    info!("🚗 Checkins:");
    info!("   POST /api/checkins - Registrar entrada");
    info!("   GET  /api/checkins - Listar sesiones");
    info!("   GET  /api/checkins/:token - Obtener sesión");
    info!("   GET  /api/checkins/:token/estimate - Estimar importe");
    info!("   POST /api/checkins/:token/checkout - Registrar salida");
    info!("🎫 Abonos: GET/POST /api/passes, GET /api/passes/vehicle/:plate, DELETE /api/passes/:id");
    info!("📊 Dashboard: GET /api/dashboard?date=YYYY-MM-DD");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
