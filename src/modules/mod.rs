pub mod auth;
pub mod quizzes;
pub mod users;
