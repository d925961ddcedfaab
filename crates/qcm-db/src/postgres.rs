//! PostgreSQL implementation of the store traits.

use qcm_models::{NewQuiz, NewUser, Quiz, User, UserChanges, UserRow};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::store::{QuizStore, StoreError, StoreFuture, UserStore};

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at, updated_at";
const PUBLIC_USER_COLUMNS: &str = "id, username, email, role, created_at, updated_at";
const QUIZ_COLUMNS: &str = "id, title, description, creator_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn find_user_where(
        &self,
        column: &'static str,
        value: &str,
    ) -> Result<Option<UserRow>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

impl UserStore for PgStore {
    fn insert_user<'a>(&'a self, user: &'a NewUser) -> StoreFuture<'a, i64> {
        Box::pin(async move {
            sqlx::query_scalar::<_, i64>(
                "INSERT INTO users (username, email, password_hash, role) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
        })
    }

    fn find_user_by_id(&self, id: i64) -> StoreFuture<'_, Option<UserRow>> {
        Box::pin(async move {
            let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
            let row = sqlx::query_as::<_, UserRow>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        })
    }

    fn find_user_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Option<UserRow>> {
        Box::pin(self.find_user_where("email", email))
    }

    fn find_user_by_username<'a>(
        &'a self,
        username: &'a str,
    ) -> StoreFuture<'a, Option<UserRow>> {
        Box::pin(self.find_user_where("username", username))
    }

    fn list_users(&self) -> StoreFuture<'_, Vec<User>> {
        Box::pin(async move {
            let query = format!("SELECT {PUBLIC_USER_COLUMNS} FROM users ORDER BY id");
            let users = sqlx::query_as::<_, User>(&query)
                .fetch_all(&self.pool)
                .await?;
            Ok(users)
        })
    }

    fn update_user<'a>(&'a self, id: i64, changes: &'a UserChanges) -> StoreFuture<'a, u64> {
        Box::pin(async move {
            if changes.is_empty() {
                return Ok(0);
            }

            let mut builder = QueryBuilder::<Postgres>::new("UPDATE users SET updated_at = NOW()");
            if let Some(username) = &changes.username {
                builder.push(", username = ").push_bind(username);
            }
            if let Some(email) = &changes.email {
                builder.push(", email = ").push_bind(email);
            }
            if let Some(password_hash) = &changes.password_hash {
                builder.push(", password_hash = ").push_bind(password_hash);
            }
            if let Some(role) = changes.role {
                builder.push(", role = ").push_bind(role.as_str());
            }
            builder.push(" WHERE id = ").push_bind(id);

            let result = builder
                .build()
                .execute(&self.pool)
                .await
                .map_err(StoreError::from_sqlx)?;
            Ok(result.rows_affected())
        })
    }

    fn delete_user(&self, id: i64) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        })
    }
}

impl QuizStore for PgStore {
    fn list_quizzes(&self) -> StoreFuture<'_, Vec<Quiz>> {
        Box::pin(async move {
            let query = format!("SELECT {QUIZ_COLUMNS} FROM quizzes ORDER BY id");
            let quizzes = sqlx::query_as::<_, Quiz>(&query)
                .fetch_all(&self.pool)
                .await?;
            Ok(quizzes)
        })
    }

    fn find_quiz(&self, id: i64) -> StoreFuture<'_, Option<Quiz>> {
        Box::pin(async move {
            let query = format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = $1");
            let quiz = sqlx::query_as::<_, Quiz>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(quiz)
        })
    }

    fn insert_quiz<'a>(&'a self, quiz: &'a NewQuiz) -> StoreFuture<'a, i64> {
        Box::pin(async move {
            let id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO quizzes (title, description, creator_id) \
                 VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(&quiz.title)
            .bind(&quiz.description)
            .bind(quiz.creator_id)
            .fetch_one(&self.pool)
            .await?;
            Ok(id)
        })
    }

    fn update_quiz<'a>(&'a self, id: i64, quiz: &'a NewQuiz) -> StoreFuture<'a, Option<Quiz>> {
        Box::pin(async move {
            let query = format!(
                "UPDATE quizzes SET title = $1, description = $2, updated_at = NOW() \
                 WHERE id = $3 AND creator_id = $4 RETURNING {QUIZ_COLUMNS}"
            );
            let updated = sqlx::query_as::<_, Quiz>(&query)
                .bind(&quiz.title)
                .bind(&quiz.description)
                .bind(id)
                .bind(quiz.creator_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(updated)
        })
    }

    fn delete_quiz(&self, id: i64, creator_id: i64) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM quizzes WHERE id = $1 AND creator_id = $2")
                .bind(id)
                .bind(creator_id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        })
    }
}
