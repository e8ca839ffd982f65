//! Axum application setup.

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use colored::Colorize;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;
use crate::web::static_handler;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        .route("/predict", post(handlers::predict))
        .route("/sweep", post(handlers::sweep))
        .route("/estimate", post(handlers::estimate))
        .route("/regions", get(handlers::get_regions))
        .route("/model", get(handlers::get_model))
        .route("/form", get(handlers::get_form))
        .layer(cors);

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .nest("/api", api_routes)
        .route("/assets/*path", get(static_handler))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

/// Print one line per request when running verbose.
async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.verbose {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let status = response.status();
    let status_text = if status.is_success() {
        status.as_u16().to_string().green()
    } else if status.is_client_error() {
        status.as_u16().to_string().yellow()
    } else {
        status.as_u16().to_string().red()
    };
    println!("{} {} {}", method.to_string().cyan(), path, status_text);

    response
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    println!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
