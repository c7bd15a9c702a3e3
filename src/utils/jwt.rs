//! 访问令牌校验
//!
//! 令牌由统一认证服务以 HS256 签发，本服务只做校验。

use crate::config::AppConfig;
use crate::models::actors::entities::ActorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_TYPE: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 学生或管理员 ID
    pub kind: ActorKind,    // 身份类型
    pub token_type: String, // 只接受 "access"
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok().filter(|id| *id > 0)
    }
}

pub struct JwtUtils;

impl JwtUtils {
    /// 按全局配置校验访问令牌
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::verify_with(token, config.jwt.secret.as_bytes(), config.jwt.leeway)
    }

    pub fn verify_with(
        token: &str,
        secret: &[u8],
        leeway: u64,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway;

        let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?.claims;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &[u8] = b"test-secret";

    fn token(kind: ActorKind, token_type: &str, ttl_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "12".into(),
            kind,
            token_type: token_type.into(),
            exp: (now + ttl_secs) as usize,
            iat: now as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    #[test]
    fn test_valid_access_token() {
        let claims = JwtUtils::verify_with(&token(ActorKind::Student, "access", 600), SECRET, 0)
            .unwrap();
        assert_eq!(claims.kind, ActorKind::Student);
        assert_eq!(claims.subject_id(), Some(12));
    }

    #[test]
    fn test_refresh_token_rejected() {
        let result = JwtUtils::verify_with(&token(ActorKind::Admin, "refresh", 600), SECRET, 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_and_expired() {
        let good = token(ActorKind::Admin, "access", 600);
        assert!(JwtUtils::verify_with(&good, b"other", 0).is_err());

        let expired = token(ActorKind::Admin, "access", -600);
        assert!(JwtUtils::verify_with(&expired, SECRET, 0).is_err());
    }
}
