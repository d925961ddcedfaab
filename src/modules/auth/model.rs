pub use qcm_models::auth::{
    MeResponse, MessageResponse, RegisterResponse, SignInRequest, SignUpRequest,
};

/// A freshly issued session token and its expiry (unix seconds).
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: i64,
}
