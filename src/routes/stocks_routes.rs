use axum::{Router, routing::get};
use crate::{AppState, controllers::stocks_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/recommendations", get(stocks_controller::get_recommendations))
        .route("/search", get(stocks_controller::get_search))
}
