//! Data-access traits.
//!
//! Methods return boxed futures so the traits stay object safe and the
//! application can hold an `Arc<dyn Store>`.

use std::future::Future;
use std::pin::Pin;

use qcm_models::{NewQuiz, NewUser, Quiz, User, UserChanges, UserRow};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
}

impl StoreError {
    /// Classifies a sqlx error, picking out unique violations (SQLSTATE `23505`).
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::UniqueViolation(constraint);
            }
        }
        StoreError::Database(err)
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation(_))
    }
}

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

pub trait UserStore: Send + Sync {
    /// Inserts a user and returns the generated id.
    fn insert_user<'a>(&'a self, user: &'a NewUser) -> StoreFuture<'a, i64>;

    fn find_user_by_id(&self, id: i64) -> StoreFuture<'_, Option<UserRow>>;

    fn find_user_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Option<UserRow>>;

    fn find_user_by_username<'a>(&'a self, username: &'a str)
    -> StoreFuture<'a, Option<UserRow>>;

    /// All users ordered by id.
    fn list_users(&self) -> StoreFuture<'_, Vec<User>>;

    /// Applies `changes` and returns the number of affected rows.
    fn update_user<'a>(&'a self, id: i64, changes: &'a UserChanges) -> StoreFuture<'a, u64>;

    /// Deletes a user (and their quizzes) and returns the number of affected rows.
    fn delete_user(&self, id: i64) -> StoreFuture<'_, u64>;
}

pub trait QuizStore: Send + Sync {
    /// All quizzes ordered by id.
    fn list_quizzes(&self) -> StoreFuture<'_, Vec<Quiz>>;

    fn find_quiz(&self, id: i64) -> StoreFuture<'_, Option<Quiz>>;

    /// Inserts a quiz and returns the generated id.
    fn insert_quiz<'a>(&'a self, quiz: &'a NewQuiz) -> StoreFuture<'a, i64>;

    /// Rewrites title and description of quiz `id` if `quiz.creator_id`
    /// created it. `None` when no such quiz exists for that creator.
    fn update_quiz<'a>(&'a self, id: i64, quiz: &'a NewQuiz) -> StoreFuture<'a, Option<Quiz>>;

    /// Deletes quiz `id` if `creator_id` created it; returns affected rows.
    fn delete_quiz(&self, id: i64, creator_id: i64) -> StoreFuture<'_, u64>;
}

/// Everything the application needs from storage.
pub trait Store: UserStore + QuizStore {}

impl<T> Store for T where T: UserStore + QuizStore {}
