pub mod health;
pub mod resolve;
pub mod views;

use crate::state::AppState;
use axum::Router;

/// Configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(resolve::routes(state))
        .merge(views::routes())
}
