//! # QCM API
//!
//! A quiz (QCM) REST backend built with Axum and PostgreSQL: accounts,
//! cookie-based sessions and quiz management, guarded by a fixed role
//! hierarchy.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Administrative commands (create-admin)
//! ├── middleware/       # Authentication, authorization, session cookie
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Register, login, logout, me
//! │   ├── users/       # User accounts
//! │   └── quizzes/     # Quizzes
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Route tree and global layers
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validating extractors
//! ```
//!
//! Each feature module has a `controller.rs` (handlers), `service.rs`
//! (business logic over the store), `model.rs` (DTO re-exports) and
//! `router.rs` (routes and their access-control layers).
//!
//! ## Roles
//!
//! ```text
//! admin    ─ every route, any user's account
//!   ↓
//! creator  ─ create, edit and delete own quizzes
//!   ↓
//! user     ─ read quizzes, manage own account
//! ```
//!
//! Admin accounts are created with `qcm create-admin`.
//!
//! ## Sessions
//!
//! Login sets an `HttpOnly` cookie named `token` holding an HS256 JWT valid
//! for one hour. Logout clears the cookie; tokens are not revoked
//! server-side.
//!
//! ## API documentation
//!
//! The OpenAPI document is served at `/api-docs/openapi.json`.

pub mod cli;
pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use qcm_auth;
pub use qcm_config;
pub use qcm_core;
pub use qcm_db;
pub use qcm_models;
