use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub admin_id: String,
    pub issued_at: DateTime<Utc>,
}

/// Signed bearer token: `base64url(adminId:issuedAtSecs).base64url(hmac)`.
/// The signature makes the claims tamper-evident; expiry is re-checked on
/// every verification against the configured validity window.
pub fn issue_token(secret: &str, admin_id: &str) -> anyhow::Result<String> {
    issue_token_at(secret, admin_id, Utc::now())
}

pub fn issue_token_at(
    secret: &str,
    admin_id: &str,
    issued_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    let payload = format!("{}:{}", admin_id, issued_at.timestamp());
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("failed to build token signer: {e}"))?;
    mac.update(payload.as_bytes());
    let sig = mac.finalize().into_bytes();

    Ok(format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(payload.as_bytes()),
        URL_SAFE_NO_PAD.encode(sig)
    ))
}

pub fn verify_token(secret: &str, token: &str, ttl_hours: i64) -> Option<TokenClaims> {
    verify_token_at(secret, token, ttl_hours, Utc::now())
}

/// Returns the claims only when the token is well-formed, the signature
/// matches and the validity window has not elapsed. All failure causes
/// collapse to `None`; callers must not distinguish them.
pub fn verify_token_at(
    secret: &str,
    token: &str,
    ttl_hours: i64,
    now: DateTime<Utc>,
) -> Option<TokenClaims> {
    let (payload_b64, sig_b64) = token.split_once('.')?;
    let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
    let sig = URL_SAFE_NO_PAD.decode(sig_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(&payload);
    mac.verify_slice(&sig).ok()?;

    let payload = String::from_utf8(payload).ok()?;
    let (admin_id, ts) = payload.rsplit_once(':')?;
    if admin_id.is_empty() {
        return None;
    }
    let issued_at = DateTime::<Utc>::from_timestamp(ts.parse().ok()?, 0)?;

    if now - issued_at > Duration::hours(ttl_hours) {
        return None;
    }

    Some(TokenClaims {
        admin_id: admin_id.to_string(),
        issued_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip() {
        let token = issue_token(SECRET, "admin-1").unwrap();
        let claims = verify_token(SECRET, &token, 24).unwrap();
        assert_eq!(claims.admin_id, "admin-1");
    }

    #[test]
    fn expired_token_rejected() {
        let issued_at = Utc::now() - Duration::hours(25);
        let token = issue_token_at(SECRET, "admin-1", issued_at).unwrap();
        assert!(verify_token(SECRET, &token, 24).is_none());
    }

    #[test]
    fn token_valid_just_inside_window() {
        let issued_at = Utc::now() - Duration::hours(23);
        let token = issue_token_at(SECRET, "admin-1", issued_at).unwrap();
        assert!(verify_token(SECRET, &token, 24).is_some());
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = issue_token(SECRET, "admin-1").unwrap();
        assert!(verify_token("other-secret", &token, 24).is_none());
    }

    #[test]
    fn tampered_payload_rejected() {
        let token = issue_token(SECRET, "admin-1").unwrap();
        let (_, sig) = token.split_once('.').unwrap();
        let forged_payload =
            URL_SAFE_NO_PAD.encode(format!("admin-2:{}", Utc::now().timestamp()));
        let forged = format!("{forged_payload}.{sig}");
        assert!(verify_token(SECRET, &forged, 24).is_none());
    }

    #[test]
    fn garbage_rejected() {
        assert!(verify_token(SECRET, "", 24).is_none());
        assert!(verify_token(SECRET, "no-dot-here", 24).is_none());
        assert!(verify_token(SECRET, "a.b", 24).is_none());
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }
}
