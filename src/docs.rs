use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use qcm_auth::Role;
use qcm_core::ErrorResponse;
use qcm_models::{
    CreatedQuizResponse, MeResponse, MessageResponse, Quiz, QuizRequest, RegisterResponse,
    SignInRequest, SignUpRequest, UpdateUserRequest, User,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "QCM API", description = "Quiz management backend"),
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::quizzes::controller::get_quizzes,
        crate::modules::quizzes::controller::get_quiz,
        crate::modules::quizzes::controller::create_quiz,
        crate::modules::quizzes::controller::update_quiz,
        crate::modules::quizzes::controller::delete_quiz,
    ),
    components(
        schemas(
            Role,
            User,
            UpdateUserRequest,
            SignUpRequest,
            SignInRequest,
            RegisterResponse,
            MeResponse,
            MessageResponse,
            Quiz,
            QuizRequest,
            CreatedQuizResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and cookie sessions"),
        (name = "Users", description = "User accounts"),
        (name = "Quizzes", description = "Quiz management")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/users/{id}",
            "/api/quizzes/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_cookie_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("cookie_auth"));
    }
}
