use crate::error::AppError;
use crate::state::AppState;
use crate::views;
use axum::{
    Router,
    routing::{get, post},
};
use fridge_core::data::Database;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(views::home_page).post(views::new_list))
        .route("/fridge/new", post(views::new_list))
        .route("/fridge/{list_id}/", get(views::view_list))
        .route("/fridge/{list_id}/add_item", post(views::add_item))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the application on `addr` until the process is stopped.
pub async fn serve(addr: SocketAddr, db: Database) -> Result<(), AppError> {
    let app = router(AppState::new(db)?);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Fridge listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
