use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{file} uses schema version {found}, newer than this build supports")]
    UnsupportedVersion { file: String, found: u64 },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("password must be at least {0} characters")]
    WeakPassword(usize),
    #[error("an account for {0} already exists")]
    DuplicateAccount(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("could not hash password: {0}")]
    Hashing(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("post content cannot be empty")]
    EmptyPost,
    #[error("one or more verification answers are incorrect")]
    ChallengeFailed,
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Anything a user-facing handler can fail with. Handlers turn these into toasts.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_wraps_store_error() {
        let err: AuthError = StoreError::NotFound("account u-1".to_string()).into();
        assert_eq!(err.to_string(), "account u-1 not found");
    }

    #[test]
    fn top_level_error_displays_inner_message() {
        let err: Error = ValidationError::EmptyPost.into();
        assert_eq!(err.to_string(), "post content cannot be empty");
    }
}
