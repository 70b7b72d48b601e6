use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::auth::{
    error::AuthError,
    jwt::TokenService,
    password::{hash_password, verify_password},
    repo::IdentityStore,
    repo_types::Identity,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

lazy_static! {
    // Verified against on unknown-email logins so both failure paths cost one
    // Argon2 run.
    static ref DUMMY_HASH: String = hash_password("jobtracker-dummy-password").unwrap_or_default();
}

/// Registration, login and token authentication over an `IdentityStore`.
///
/// Inputs are expected to be validated already; this layer only decides
/// credentials and identity.
#[derive(Clone)]
pub struct AuthService {
    identities: Arc<dyn IdentityStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(identities: Arc<dyn IdentityStore>, tokens: TokenService) -> Self {
        Self { identities, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if self.identities.find_identity_by_email(email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let hash = hash_password(password)?;
        // The unique constraint still catches a concurrent registration.
        let identity = self.identities.create_identity(email, &hash).await?;

        info!(user_id = identity.id, email = %identity.email, "user registered");
        Ok(identity)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let Some(identity) = self.identities.find_identity_by_email(email).await? else {
            warn!(email = %email, "login unknown email");
            let _ = verify_password(password, &DUMMY_HASH);
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &identity.password_hash)? {
            warn!(user_id = identity.id, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(identity.id)?;
        info!(user_id = identity.id, "user logged in");
        Ok(token)
    }

    pub async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        self.tokens
            .resolve_current_identity(token, self.identities.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::StoreError;
    use crate::config::JwtConfig;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryIdentityStore {
        rows: Mutex<Vec<Identity>>,
    }

    impl MemoryIdentityStore {
        fn remove(&self, id: i64) {
            self.rows.lock().unwrap().retain(|i| i.id != id);
        }
    }

    #[async_trait]
    impl IdentityStore for MemoryIdentityStore {
        async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
            Ok(self.rows.lock().unwrap().iter().find(|i| i.email == email).cloned())
        }

        async fn find_identity_by_id(&self, id: i64) -> Result<Option<Identity>, StoreError> {
            Ok(self.rows.lock().unwrap().iter().find(|i| i.id == id).cloned())
        }

        async fn create_identity(
            &self,
            email: &str,
            password_hash: &str,
        ) -> Result<Identity, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|i| i.email == email) {
                return Err(StoreError::DuplicateEmail);
            }
            let identity = Identity {
                id: rows.len() as i64 + 1,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            };
            rows.push(identity.clone());
            Ok(identity)
        }
    }

    fn make_service() -> (AuthService, Arc<MemoryIdentityStore>) {
        let store = Arc::new(MemoryIdentityStore::default());
        let tokens = TokenService::new(&JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 30,
        });
        (AuthService::new(store.clone(), tokens), store)
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("with space@example.com"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn register_then_duplicate_is_rejected() {
        let (auth, _) = make_service();
        let identity = auth.register("a@example.com", "hunter2").await.unwrap();
        assert_eq!(identity.email, "a@example.com");
        assert_ne!(identity.password_hash, "hunter2");

        let err = auth.register("a@example.com", "hunter2").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailAlreadyRegistered));
    }

    #[test]
    fn store_level_duplicate_maps_to_email_taken() {
        let err: AuthError = StoreError::DuplicateEmail.into();
        assert!(matches!(err, AuthError::EmailAlreadyRegistered));
    }

    #[tokio::test]
    async fn login_issues_token_for_registered_user() {
        let (auth, _) = make_service();
        let identity = auth.register("a@example.com", "hunter2").await.unwrap();

        let token = auth.login("a@example.com", "hunter2").await.unwrap();
        assert_eq!(auth.tokens().verify(&token).unwrap(), identity.id);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let (auth, _) = make_service();
        auth.register("a@example.com", "hunter2").await.unwrap();

        let wrong_password = auth.login("a@example.com", "wrongpass").await.unwrap_err();
        let unknown_email = auth.login("b@example.com", "hunter2").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[test]
    fn dummy_hash_is_a_real_argon2_hash() {
        assert!(DUMMY_HASH.starts_with("$argon2"));
        assert!(!verify_password("hunter2", &DUMMY_HASH).unwrap());
    }

    #[tokio::test]
    async fn authenticate_resolves_identity() {
        let (auth, _) = make_service();
        let identity = auth.register("a@example.com", "hunter2").await.unwrap();
        let token = auth.login("a@example.com", "hunter2").await.unwrap();

        assert_eq!(auth.authenticate(&token).await.unwrap(), identity);
    }

    #[tokio::test]
    async fn authenticate_rejects_token_of_deleted_user() {
        let (auth, store) = make_service();
        let identity = auth.register("a@example.com", "hunter2").await.unwrap();
        let token = auth.login("a@example.com", "hunter2").await.unwrap();

        store.remove(identity.id);

        assert_eq!(auth.tokens().verify(&token).unwrap(), identity.id);
        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
    }

    #[tokio::test]
    async fn authenticate_rejects_garbage() {
        let (auth, _) = make_service();
        let err = auth.authenticate("garbage").await.unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
    }
}
