use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Global cached JwtService instance
static JWT_SERVICE: OnceLock<JwtService> = OnceLock::new();

/// Get the cached JwtService instance
///
/// Uses OnceLock for thread-safe lazy initialization; the service is built
/// once from config and reused for every request.
pub fn get_jwt_service() -> &'static JwtService {
    JWT_SERVICE.get_or_init(JwtService::from_config)
}

/// Session token claims. There is deliberately no refresh token: once the
/// session expires the operator logs in again.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, session_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_minutes,
        }
    }

    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self::new(&config.auth.jwt_secret, config.auth.session_minutes)
    }

    pub fn generate_session_token(
        &self,
        username: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.session_minutes as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate_session_token(
        &self,
        token: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test_secret_key_32_bytes_long!!", 60)
    }

    #[test]
    fn test_generate_and_validate_session_token() {
        let service = create_test_service();
        let token = service.generate_session_token("operator").unwrap();
        let claims = service.validate_session_token(&token).unwrap();

        assert_eq!(claims.sub, "operator");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.validate_session_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service1 = create_test_service();
        let service2 = JwtService::new("different_secret_key_32_bytes!!", 60);

        let token = service1.generate_session_token("operator").unwrap();
        assert!(service2.validate_session_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();

        // Expired well past the default leeway
        let now = Utc::now();
        let claims = SessionClaims {
            sub: "operator".to_string(),
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let encoding_key = EncodingKey::from_secret(b"test_secret_key_32_bytes_long!!");
        let token = encode(&Header::default(), &claims, &encoding_key).unwrap();

        assert!(
            service.validate_session_token(&token).is_err(),
            "expected expired token to be rejected"
        );
    }
}
