use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use qcm_auth::RolePolicy;

use super::controller::{create_quiz, delete_quiz, get_quiz, get_quizzes, update_quiz};
use crate::middleware::auth::authenticate;
use crate::middleware::role::authorize_roles;
use crate::state::AppState;

pub fn init_quizzes_router(state: &AppState) -> Router<AppState> {
    let readers = Router::new()
        .route("/", get(get_quizzes))
        .route("/{id}", get(get_quiz))
        .route_layer(middleware::from_fn_with_state(
            RolePolicy::ANY_USER,
            authorize_roles,
        ));

    let creators = Router::new()
        .route("/", post(create_quiz))
        .route("/{id}", put(update_quiz).delete(delete_quiz))
        .route_layer(middleware::from_fn_with_state(
            RolePolicy::CREATORS,
            authorize_roles,
        ));

    readers
        .merge(creators)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
}
