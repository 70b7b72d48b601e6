use thiserror::Error;

use super::repo::StoreError;

/// Outcomes of the authentication flows.
///
/// `InvalidCredentials` and `NotAuthenticated` deliberately carry no detail:
/// callers must not be able to tell an unknown email from a wrong password,
/// or an expired token from a forged one.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already registered")]
    EmailAlreadyRegistered,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::EmailAlreadyRegistered,
            StoreError::Database(e) => AuthError::Internal(anyhow::Error::new(e)),
        }
    }
}
