use axum::{middleware::map_response, Router};
use tower_http::trace::TraceLayer;

use crate::{AppState, controllers::home_controller};

pub mod home_routes;
pub mod user_routes;
pub mod stocks_routes;
pub mod swipe_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = user_routes::add_routes(router);
    let router = stocks_routes::add_routes(router);
    let router = swipe_routes::add_routes(router);

    router
        .fallback(home_controller::not_found)
        .layer(map_response(home_controller::json_method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
