use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::user_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", post(user_controller::create_user))
        .route(
            "/:user_id/interests",
            get(user_controller::get_interests)
                .post(user_controller::create_interests)
                .put(user_controller::update_interests)
                .delete(user_controller::clear_interests),
        )
}
