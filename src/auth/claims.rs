use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which half of the session pair a token is. Only `Access` tokens pass
/// `require_session`; only `Refresh` tokens are accepted by `/auth/refresh`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Payload of a quizweather session token. `sub` is the player's user id,
/// the only identity the protected routes ever see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    /// Unix seconds.
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}
