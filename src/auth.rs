//! Passwordless authentication: one-time passcodes delivered through the
//! notification stub, exchanged for a signed JWT access token.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

pub const TOKEN_ISSUER: &str = "itops-api";

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Issue an HS256 access token for a verified user.
pub fn issue_access_token(
    user_id: Uuid,
    name: &str,
    email: &str,
    role: &str,
    department: &str,
    secret: &str,
    expiration_secs: usize,
) -> Result<String, ServiceError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        department: department.to_string(),
        iat: now.timestamp(),
        exp: now.timestamp() + expiration_secs as i64,
        iss: TOKEN_ISSUER.to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::AuthError(format!("failed to sign token: {}", e)))
}

/// Decode and verify an access token.
pub fn decode_access_token(token: &str, secret: &str) -> Result<Claims, ServiceError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| ServiceError::AuthError(format!("invalid token: {}", e)))
}

/// Generate a 6-digit one-time passcode.
pub fn generate_otp_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

/// OTP codes are exactly six ASCII digits.
pub fn is_valid_otp_format(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_for_testing_purposes_only_32chars";

    #[test]
    fn token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_access_token(
            user_id,
            "Dana Ops",
            "dana@example.com",
            "Manager",
            "IT",
            SECRET,
            3600,
        )
        .expect("token should be issued");

        let claims = decode_access_token(&token, SECRET).expect("token should decode");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "dana@example.com");
        assert_eq!(claims.role, "Manager");
        assert_eq!(claims.iss, TOKEN_ISSUER);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_access_token(
            Uuid::new_v4(),
            "Dana Ops",
            "dana@example.com",
            "Employee",
            "IT",
            SECRET,
            3600,
        )
        .unwrap();

        assert!(decode_access_token(&token, "another_secret_that_is_long_enough_000").is_err());
    }

    #[test]
    fn otp_format_checks() {
        assert!(is_valid_otp_format("123456"));
        assert!(!is_valid_otp_format("12345"));
        assert!(!is_valid_otp_format("1234567"));
        assert!(!is_valid_otp_format("12a456"));

        for _ in 0..32 {
            let code = generate_otp_code();
            assert!(is_valid_otp_format(&code), "generated {}", code);
        }
    }
}
