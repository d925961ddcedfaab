//! In-memory store for tests.
//!
//! Mirrors the PostgreSQL schema: generated ids, unique usernames and
//! emails, and quizzes deleted along with their creator.

use std::collections::BTreeMap;

use chrono::Utc;
use qcm_models::{NewQuiz, NewUser, Quiz, User, UserChanges, UserRow};
use tokio::sync::RwLock;

use crate::store::{QuizStore, StoreError, StoreFuture, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, UserRow>,
    quizzes: BTreeMap<i64, Quiz>,
    last_user_id: i64,
    last_quiz_id: i64,
}

impl Tables {
    fn check_unique(
        &self,
        except_id: Option<i64>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), StoreError> {
        for user in self.users.values() {
            if Some(user.id) == except_id {
                continue;
            }
            if username == Some(user.username.as_str()) {
                return Err(StoreError::UniqueViolation("users_username_key".to_string()));
            }
            if email == Some(user.email.as_str()) {
                return Err(StoreError::UniqueViolation("users_email_key".to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    fn insert_user<'a>(&'a self, user: &'a NewUser) -> StoreFuture<'a, i64> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            tables.check_unique(None, Some(&user.username), Some(&user.email))?;

            tables.last_user_id += 1;
            let id = tables.last_user_id;
            let now = Utc::now();
            tables.users.insert(
                id,
                UserRow {
                    id,
                    username: user.username.clone(),
                    email: user.email.clone(),
                    password_hash: user.password_hash.clone(),
                    role: user.role.to_string(),
                    created_at: now,
                    updated_at: now,
                },
            );
            Ok(id)
        })
    }

    fn find_user_by_id(&self, id: i64) -> StoreFuture<'_, Option<UserRow>> {
        Box::pin(async move { Ok(self.tables.read().await.users.get(&id).cloned()) })
    }

    fn find_user_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Option<UserRow>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables.users.values().find(|u| u.email == email).cloned())
        })
    }

    fn find_user_by_username<'a>(
        &'a self,
        username: &'a str,
    ) -> StoreFuture<'a, Option<UserRow>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables.users.values().find(|u| u.username == username).cloned())
        })
    }

    fn list_users(&self) -> StoreFuture<'_, Vec<User>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables.users.values().cloned().map(User::from).collect())
        })
    }

    fn update_user<'a>(&'a self, id: i64, changes: &'a UserChanges) -> StoreFuture<'a, u64> {
        Box::pin(async move {
            if changes.is_empty() {
                return Ok(0);
            }

            let mut tables = self.tables.write().await;
            if !tables.users.contains_key(&id) {
                return Ok(0);
            }
            tables.check_unique(
                Some(id),
                changes.username.as_deref(),
                changes.email.as_deref(),
            )?;

            let Some(user) = tables.users.get_mut(&id) else {
                return Ok(0);
            };
            if let Some(username) = &changes.username {
                user.username = username.clone();
            }
            if let Some(email) = &changes.email {
                user.email = email.clone();
            }
            if let Some(password_hash) = &changes.password_hash {
                user.password_hash = password_hash.clone();
            }
            if let Some(role) = changes.role {
                user.role = role.to_string();
            }
            user.updated_at = Utc::now();
            Ok(1)
        })
    }

    fn delete_user(&self, id: i64) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            if tables.users.remove(&id).is_none() {
                return Ok(0);
            }
            tables.quizzes.retain(|_, quiz| quiz.creator_id != id);
            Ok(1)
        })
    }
}

impl QuizStore for MemoryStore {
    fn list_quizzes(&self) -> StoreFuture<'_, Vec<Quiz>> {
        Box::pin(async move { Ok(self.tables.read().await.quizzes.values().cloned().collect()) })
    }

    fn find_quiz(&self, id: i64) -> StoreFuture<'_, Option<Quiz>> {
        Box::pin(async move { Ok(self.tables.read().await.quizzes.get(&id).cloned()) })
    }

    fn insert_quiz<'a>(&'a self, quiz: &'a NewQuiz) -> StoreFuture<'a, i64> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            if !tables.users.contains_key(&quiz.creator_id) {
                return Err(StoreError::Database(sqlx::Error::RowNotFound));
            }

            tables.last_quiz_id += 1;
            let id = tables.last_quiz_id;
            let now = Utc::now();
            tables.quizzes.insert(
                id,
                Quiz {
                    id,
                    title: quiz.title.clone(),
                    description: quiz.description.clone(),
                    creator_id: quiz.creator_id,
                    created_at: now,
                    updated_at: now,
                },
            );
            Ok(id)
        })
    }

    fn update_quiz<'a>(&'a self, id: i64, quiz: &'a NewQuiz) -> StoreFuture<'a, Option<Quiz>> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let Some(existing) = tables
                .quizzes
                .get_mut(&id)
                .filter(|existing| existing.creator_id == quiz.creator_id)
            else {
                return Ok(None);
            };
            existing.title = quiz.title.clone();
            existing.description = quiz.description.clone();
            existing.updated_at = Utc::now();
            Ok(Some(existing.clone()))
        })
    }

    fn delete_quiz(&self, id: i64, creator_id: i64) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let owned = tables
                .quizzes
                .get(&id)
                .is_some_and(|quiz| quiz.creator_id == creator_id);
            if !owned {
                return Ok(0);
            }
            tables.quizzes.remove(&id);
            Ok(1)
        })
    }
}
