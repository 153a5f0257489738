//! HTTP surface for recipebox.
//!
//! | Method | Path           | Handler                       |
//! |--------|----------------|-------------------------------|
//! | GET    | `/`            | [`handlers::welcome`]         |
//! | GET    | `/api/recipes` | [`handlers::list_recipes`]    |
//! | POST   | `/api/recipes` | [`handlers::create_recipe`]   |

pub mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn};

use crate::book::RecipeBook;
use crate::config::Config;
use crate::error::Result;
use crate::logging::REQUEST_LEVEL;
use crate::storage::FileStore;

/// Build the application router over a recipe book.
#[must_use]
pub fn router(book: RecipeBook, cors_enabled: bool) -> Router {
    let app = Router::new()
        .route("/", get(handlers::welcome))
        .route(
            "/api/recipes",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .with_state(book)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(REQUEST_LEVEL))
                .on_response(DefaultOnResponse::new().level(REQUEST_LEVEL)),
        );

    if cors_enabled {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

/// Build the recipe book described by the configuration.
#[must_use]
pub fn book_from_config(config: &Config) -> RecipeBook {
    let store = FileStore::new(config.data_path());
    RecipeBook::new(Arc::new(store), config.read_policy())
}

/// Bind the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid, cannot be bound, or the
/// server fails while running.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.socket_addr()?;
    let book = book_from_config(config);
    let listener = TcpListener::bind(addr).await?;

    info!(
        store = %book.store().describe(),
        read_policy = ?book.read_policy(),
        "Server running on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, router(book, config.server.cors_enabled))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
