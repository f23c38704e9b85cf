//! Service account login tokens.
//!
//! A service account proves its identity by signing a short-lived JWT with
//! its private key; the cluster verifies it against the registered public
//! key and answers with a regular access token.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use super::error::LoginError;

/// Lifetime of a service login token, in seconds.
pub const SERVICE_TOKEN_LIFETIME_SECS: i64 = 5 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceClaims {
    pub uid: String,
    pub exp: i64,
}

/// Issues an RS256 login token for `uid`, signed with a PEM RSA key.
pub fn issue_service_token(uid: &str, private_key_pem: &[u8]) -> Result<String, LoginError> {
    let key = EncodingKey::from_rsa_pem(private_key_pem).map_err(LoginError::Signing)?;
    let claims = ServiceClaims {
        uid: uid.to_string(),
        exp: Utc::now().timestamp() + SERVICE_TOKEN_LIFETIME_SECS,
    };
    encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(LoginError::Signing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    const PRIVATE_KEY: &[u8] = include_bytes!("../../tests/fixtures/service_key.pem");
    const PUBLIC_KEY: &[u8] = include_bytes!("../../tests/fixtures/service_key.pub.pem");

    fn verify(token: &str) -> ServiceClaims {
        let key = DecodingKey::from_rsa_pem(PUBLIC_KEY).unwrap();
        decode::<ServiceClaims>(token, &key, &Validation::new(Algorithm::RS256))
            .unwrap()
            .claims
    }

    #[test]
    fn token_is_rs256_and_verifiable() {
        let token = issue_service_token("jenkins", PRIVATE_KEY).unwrap();
        assert_eq!(decode_header(&token).unwrap().alg, Algorithm::RS256);
        assert_eq!(verify(&token).uid, "jenkins");
    }

    #[test]
    fn token_expires_five_minutes_after_issuance() {
        let before = Utc::now().timestamp();
        let token = issue_service_token("svc", PRIVATE_KEY).unwrap();
        let after = Utc::now().timestamp();

        let exp = verify(&token).exp;
        assert!(exp >= before + 300 && exp <= after + 300, "exp={exp}");
    }

    #[test]
    fn malformed_key_is_a_signing_error() {
        let err = issue_service_token("svc", b"-----BEGIN NOTHING-----").unwrap_err();
        assert!(matches!(err, LoginError::Signing(_)));
    }
}
