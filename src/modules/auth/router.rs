use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{login, logout, me, register};
use crate::middleware::auth::{authenticate, check_not_authenticated};
use crate::state::AppState;

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let guests = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            check_not_authenticated,
        ));

    let members = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    guests.merge(members)
}
