//! Access-control middleware and extractors.
//!
//! Every protected route goes through the same pipeline, composed with
//! `axum::middleware::from_fn_with_state` as route layers:
//!
//! 1. [`auth::authenticate`] reads the `token` cookie, verifies it and stores
//!    the claims as [`auth::CurrentUser`] in the request extensions.
//! 2. Either [`role::authorize_roles`] (role-set policy) or
//!    [`role::check_authorization`] (ownership-or-admin policy) decides
//!    whether the caller may proceed.
//! 3. The handler's extractors validate ids and bodies.
//!
//! Sign-up and sign-in use [`auth::check_not_authenticated`] instead, which
//! turns away callers that already hold a valid session.
//!
//! ```ignore
//! Router::new()
//!     .route("/{id}", get(get_user))
//!     .route_layer(middleware::from_fn_with_state(
//!         OwnershipPolicy::SELF_OR_ADMIN,
//!         check_authorization,
//!     ))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
//! ```
//!
//! The last `route_layer` added runs first.

pub mod auth;
pub mod role;
pub mod session;
