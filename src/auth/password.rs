use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Checks `plain` against a stored PHC hash string.
///
/// A stored hash that cannot be parsed, or that names parameters or an
/// algorithm Argon2 cannot use, counts as a mismatch, not an error.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            return Ok(false);
        }
    };
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(
            e @ (password_hash::Error::Algorithm
            | password_hash::Error::Version
            | password_hash::Error::ParamNameInvalid
            | password_hash::Error::ParamNameDuplicated
            | password_hash::Error::ParamValueInvalid(_)
            | password_hash::Error::ParamsMaxExceeded
            | password_hash::Error::SaltInvalid(_)
            | password_hash::Error::B64Encoding(_)
            | password_hash::Error::OutputSize { .. }),
        ) => {
            warn!(error = %e, "stored password hash is unusable");
            Ok(false)
        }
        Err(e) => {
            error!(error = %e, "argon2 verify_password error");
            Err(anyhow::anyhow!(e.to_string()))
        }
    }
}
