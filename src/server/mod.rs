//! # HTTP Server for the Feedback Service
//!
//! Routes for accounts, forms, responses, statistics, and QR generation,
//! plus the embedded single-page frontend.
//!
//! ## Usage
//!
//! ```bash
//! opinar serve --listen 0.0.0.0:8080 --db opinar.db
//! ```
//!
//! Then open http://localhost:8080 in a browser.

mod handlers;
mod state;
mod static_files;

pub use state::ServerConfig;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::error::OpinarError;
use crate::notify::Notifier;
use crate::store::Store;
use state::AppState;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use opinar::notify;
/// use opinar::server::{ServerConfig, serve};
///
/// # async fn example() -> Result<(), opinar::error::OpinarError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     db_path: "opinar.db".to_string(),
///     public_url: "http://localhost:8080".to_string(),
/// };
///
/// serve(config, notify::from_webhook(None), false).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(
    config: ServerConfig,
    notifier: Arc<dyn Notifier>,
    seed_demo: bool,
) -> Result<(), OpinarError> {
    let store = Store::open(&config.db_path)?;
    if seed_demo {
        store.seed_demo()?;
    }

    let app_state = Arc::new(AppState::new(config.clone(), store, notifier));

    let app = Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Auth API
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        // Form API
        .route("/api/forms", post(handlers::forms::create))
        .route("/api/forms/user/:user_id", get(handlers::forms::list_for_user))
        .route(
            "/api/forms/:form_code",
            get(handlers::forms::get_by_code).delete(handlers::forms::delete),
        )
        // Response API
        .route("/api/responses", post(handlers::responses::submit))
        .route(
            "/api/responses/form/:form_id",
            get(handlers::responses::list_for_form),
        )
        // Stats API
        .route("/api/stats/:form_id", get(handlers::stats::for_form))
        // QR API
        .route("/api/qrcode", post(handlers::qrcode::generate))
        // SPA fallback for everything else
        .fallback(static_files::fallback_handler)
        .with_state(app_state);

    println!("Opinar server starting...");
    println!("Listening on: {}", config.listen_addr);
    println!("Database: {}", config.db_path);
    println!("Public URL: {}", config.public_url);
    println!();
    println!("Open {}/ in your browser", config.public_url);
    println!();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            OpinarError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| OpinarError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
