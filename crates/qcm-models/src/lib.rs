//! # QCM Models
//!
//! Database rows and request/response DTOs for the QCM API.
//!
//! Request DTOs carry their validation rules as `validator` attributes; the
//! `ValidatedJson` extractor in the main crate runs them before any handler.
//!
//! - [`auth`]: sign-up / sign-in payloads and auth responses
//! - [`users`]: user rows, public projection and update payloads
//! - [`quizzes`]: quiz rows and payloads

pub mod auth;
pub mod quizzes;
pub mod users;

pub use auth::{
    MeResponse, MessageResponse, RegisterResponse, SignInRequest, SignUpRequest,
};
pub use quizzes::{CreatedQuizResponse, NewQuiz, Quiz, QuizRequest};
pub use users::{NewUser, UpdateUserRequest, User, UserChanges, UserRow, validate_username};
