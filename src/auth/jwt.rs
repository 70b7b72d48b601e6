use anyhow::Context;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use crate::auth::{
    claims::Claims,
    error::AuthError,
    repo::IdentityStore,
    repo_types::Identity,
};
use crate::config::JwtConfig;

/// Issues and verifies HS256 access tokens.
///
/// Holds only the keys derived from the configured secret, so one instance is
/// shared by every request. Building a new instance from a different secret
/// invalidates every token the old one issued.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl_minutes: cfg.ttl_minutes,
        }
    }

    pub fn issue(&self, subject_id: i64) -> anyhow::Result<String> {
        self.issue_at(subject_id, OffsetDateTime::now_utc())
    }

    pub fn issue_at(&self, subject_id: i64, now: OffsetDateTime) -> anyhow::Result<String> {
        anyhow::ensure!(self.ttl_minutes > 0, "token lifetime must be positive");
        let exp = self
            .ttl_minutes
            .checked_mul(60)
            .map(Duration::seconds)
            .and_then(|ttl| now.checked_add(ttl))
            .context("token lifetime out of range")?;
        let claims = Claims {
            sub: subject_id.to_string(),
            iat: now.unix_timestamp(),
            exp: exp.unix_timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id = subject_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    /// Signature and structure are checked before expiry. Every failure
    /// is reported as `NotAuthenticated`; the reason only reaches the debug log.
    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<i64, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation()).map_err(|e| {
            debug!(error = %e, "jwt rejected");
            AuthError::NotAuthenticated
        })?;
        let claims = data.claims;

        if claims.exp <= now.unix_timestamp() {
            debug!(exp = claims.exp, "jwt expired");
            return Err(AuthError::NotAuthenticated);
        }

        let subject_id = claims.sub.parse::<i64>().map_err(|_| {
            debug!("jwt subject is not a user id");
            AuthError::NotAuthenticated
        })?;
        debug!(user_id = subject_id, "jwt verified");
        Ok(subject_id)
    }

    /// Verifies `token` and loads the user it was issued for. A user that no
    /// longer exists is `NotAuthenticated`, not "not found".
    pub async fn resolve_current_identity(
        &self,
        token: &str,
        identities: &dyn IdentityStore,
    ) -> Result<Identity, AuthError> {
        let subject_id = self.verify(token)?;
        match identities.find_identity_by_id(subject_id).await? {
            Some(identity) => Ok(identity),
            None => {
                warn!(user_id = subject_id, "token subject no longer exists");
                Err(AuthError::NotAuthenticated)
            }
        }
    }

    // Expiry is checked by `verify_at` against the caller's clock.
    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation
    }
}
