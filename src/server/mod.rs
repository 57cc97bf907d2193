pub mod error;
pub mod handlers;

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::config::Config;
use handlers::{add_polygon, clear_polygons, export_geojson, index, list_polygons, AppState};

const BROWSER_DELAY: Duration = Duration::from_millis(1500);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/api/polygons",
            get(list_polygons).post(add_polygon).delete(clear_polygons),
        )
        .route("/api/export", get(export_geojson))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl+C or SIGTERM.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(
        config.output_dir.clone(),
        config.validation,
    ));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Binding to {}", config.addr))?;
    log::info!("Listening on {}", config.addr);
    print_banner(&config);

    if config.open_browser {
        tokio::spawn(open_browser(config.url()));
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Serving HTTP")?;

    log::info!("Server stopped");
    Ok(())
}

fn print_banner(config: &Config) {
    let rule = "=".repeat(60);
    eprintln!("\n{}", rule);
    eprintln!("POLYGON MAPPER");
    eprintln!("{}", rule);
    eprintln!("\nServer running at: {}", config.url());
    if config.open_browser {
        eprintln!("Browser will open automatically...");
    }
    eprintln!("\nExported files will be saved in {:?}", config.output_dir);
    eprintln!("\nPress Ctrl+C to stop the server\n");
    eprintln!("{}\n", rule);
}

async fn open_browser(url: String) {
    tokio::time::sleep(BROWSER_DELAY).await;
    log::info!("Opening browser at {}", url);
    if let Err(err) = open::that_detached(&url) {
        log::warn!("Could not open browser, visit {} manually: {}", url, err);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Could not listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                log::error!("Could not listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::info!("Received Ctrl+C, shutting down"),
        () = terminate => log::info!("Received SIGTERM, shutting down"),
    }
}
