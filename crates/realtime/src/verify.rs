//! Connection handshake tokens
//!
//! A realtime connection proves which user it belongs to with a token the
//! session layer mints at login: `"<user-id>.<hex hmac-sha256(user-id)>"`
//! keyed by a shared secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Mint a connection token for a user
pub fn mint_token(user_id: Uuid, secret: &str) -> String {
    let id = user_id.to_string();
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(id.as_bytes());
    let digest = mac.finalize();
    format!("{}.{}", id, hex::encode(digest.into_bytes()))
}

/// Verify a connection token, returning the user it authenticates
pub fn verify_token(token: &str, secret: &str) -> Option<Uuid> {
    let (id_part, sig_part) = token.split_once('.')?;
    let user_id = Uuid::parse_str(id_part).ok()?;

    let signature = hex::decode(sig_part).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(id_part.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let user = Uuid::new_v4();
        let token = mint_token(user, "test-secret");

        assert_eq!(verify_token(&token, "test-secret"), Some(user));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user = Uuid::new_v4();
        let token = mint_token(user, "test-secret");

        assert_eq!(verify_token(&token, "other-secret"), None);
    }

    #[test]
    fn test_tampered_user_id_rejected() {
        let token = mint_token(Uuid::new_v4(), "test-secret");
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), sig);

        assert_eq!(verify_token(&forged, "test-secret"), None);
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert_eq!(verify_token("not-a-token", "test-secret"), None);
        assert_eq!(verify_token("", "test-secret"), None);
        assert_eq!(verify_token("abc.def", "test-secret"), None);
    }
}
