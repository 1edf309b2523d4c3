use axum::{Router, routing::post};
use crate::{AppState, controllers::swipe_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/swipe", post(swipe_controller::post_swipe))
}
