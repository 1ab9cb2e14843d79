use std::{net::SocketAddr, sync::Arc};

use tokio::signal;
use tracing::{error, info, warn};

use ecommerce_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB
    let db_pool =
        api::db::establish_connection_with_config(&api::db::DbConfig::from(&cfg)).await?;
    if cfg.auto_migrate {
        api::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    let db_arc = Arc::new(db_pool);
    let app_state = api::AppState::new(db_arc.clone(), cfg.clone());
    let app = api::app_router(app_state);

    // Bind and serve
    let ip: std::net::IpAddr = cfg.host.parse().unwrap_or_else(|_| {
        warn!("Invalid host '{}', falling back to 0.0.0.0", cfg.host);
        std::net::IpAddr::from([0, 0, 0, 0])
    });
    let addr = SocketAddr::new(ip, cfg.port);
    info!("ecommerce-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Serving has stopped, so this is the last handle to the pool
    match Arc::try_unwrap(db_arc) {
        Ok(pool) => api::db::close_pool(pool).await?,
        Err(_) => warn!("Database pool still shared at shutdown; leaving it to drop"),
    }

    info!("ecommerce-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
