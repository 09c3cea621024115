//! Player password storage. Only the PHC string lands in `users.password_hash`;
//! plaintext never leaves the register and login handlers.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Argon2id with a fresh random salt; returns the PHC string.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    match Argon2::default().hash_password(plain.as_bytes(), &salt) {
        Ok(phc) => Ok(phc.to_string()),
        Err(e) => {
            error!(error = %e, "could not hash player password");
            anyhow::bail!("password hashing failed: {e}")
        }
    }
}

/// `Ok(false)` for a wrong password; `Err` only when the stored hash is
/// not a PHC string, which `authenticate` treats as a failed login.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let phc = match PasswordHash::new(stored) {
        Ok(phc) => phc,
        Err(e) => {
            error!(error = %e, "stored password hash is malformed");
            anyhow::bail!("malformed password hash: {e}")
        }
    };
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &phc)
        .is_ok())
}
