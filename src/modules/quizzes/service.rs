use anyhow::anyhow;
use qcm_core::AppError;
use qcm_db::Store;
use tracing::{info, instrument};

use super::model::{NewQuiz, Quiz, QuizRequest};

pub struct QuizService;

impl QuizService {
    #[instrument(skip_all)]
    pub async fn get_quizzes(store: &dyn Store) -> Result<Vec<Quiz>, AppError> {
        Ok(store.list_quizzes().await?)
    }

    #[instrument(skip(store))]
    pub async fn get_quiz(store: &dyn Store, id: i64) -> Result<Quiz, AppError> {
        store
            .find_quiz(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Quiz non trouvé")))
    }

    #[instrument(skip(store, dto))]
    pub async fn create_quiz(
        store: &dyn Store,
        creator_id: i64,
        dto: QuizRequest,
    ) -> Result<i64, AppError> {
        let quiz = NewQuiz {
            title: dto.title,
            description: dto.description,
            creator_id,
        };
        let quiz_id = store.insert_quiz(&quiz).await?;
        info!(quiz_id, "Quiz created");
        Ok(quiz_id)
    }

    /// Only the quiz's creator may change it; anyone else gets the same 404
    /// as for a missing quiz.
    #[instrument(skip(store, dto))]
    pub async fn update_quiz(
        store: &dyn Store,
        creator_id: i64,
        id: i64,
        dto: QuizRequest,
    ) -> Result<Quiz, AppError> {
        let quiz = NewQuiz {
            title: dto.title,
            description: dto.description,
            creator_id,
        };
        store.update_quiz(id, &quiz).await?.ok_or_else(|| {
            AppError::not_found(anyhow!("Quiz non trouvé ou non autorisé à modifier"))
        })
    }

    #[instrument(skip(store))]
    pub async fn delete_quiz(store: &dyn Store, creator_id: i64, id: i64) -> Result<(), AppError> {
        if store.delete_quiz(id, creator_id).await? == 0 {
            return Err(AppError::not_found(anyhow!(
                "Quiz non trouvé ou non autorisé à supprimer"
            )));
        }
        info!(quiz_id = id, "Quiz deleted");
        Ok(())
    }
}
