pub use qcm_models::auth::MessageResponse;
pub use qcm_models::users::{UpdateUserRequest, User, UserChanges};
