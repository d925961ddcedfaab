pub use qcm_models::auth::MessageResponse;
pub use qcm_models::quizzes::{CreatedQuizResponse, NewQuiz, Quiz, QuizRequest};
