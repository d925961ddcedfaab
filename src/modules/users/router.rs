use axum::{Router, middleware, routing::get};
use qcm_auth::OwnershipPolicy;

use super::controller::{delete_user, get_user, get_users, update_user};
use crate::middleware::auth::authenticate;
use crate::middleware::role::check_authorization;
use crate::state::AppState;

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let admin_only = Router::new()
        .route("/", get(get_users))
        .route_layer(middleware::from_fn_with_state(
            OwnershipPolicy::ADMIN_ONLY,
            check_authorization,
        ));

    let self_or_admin = Router::new()
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(
            OwnershipPolicy::SELF_OR_ADMIN,
            check_authorization,
        ));

    admin_only
        .merge(self_or_admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
}
