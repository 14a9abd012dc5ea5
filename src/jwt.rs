use anyhow::Result;
use jsonwebtoken as jwt;
use ring::signature::{Ed25519KeyPair, KeyPair};
use serde::{Deserialize, Serialize};

use crate::auth::{Role, User};

pub(crate) struct Issuer {
    encoding_key: jwt::EncodingKey,
    decoding_key: jwt::DecodingKey,
    header: jwt::Header,
    validation: jwt::Validation,
}

#[derive(Debug, Deserialize, Serialize)]
struct Claims {
    sub: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    iss: String,
    exp: u64,
}

const JWT_ISS: &str = "localeyes";

/// Twelve hours.
const SESSION_LIFETIME: u64 = 60 * 60 * 12;

impl Issuer {
    pub(crate) fn new() -> Result<Self> {
        let key_pair = Ed25519KeyPair::generate_pkcs8(&ring::rand::SystemRandom::new())
            .map_err(|_| anyhow::anyhow!("failed to generate key pair"))?;
        let encoding_key = jwt::EncodingKey::from_ed_der(key_pair.as_ref());

        let key_pair = Ed25519KeyPair::from_pkcs8(key_pair.as_ref())
            .map_err(|_| anyhow::anyhow!("failed to parse key pair"))?;
        let decoding_key = jwt::DecodingKey::from_ed_der(key_pair.public_key().as_ref());

        let header = jwt::Header::new(jwt::Algorithm::EdDSA);
        let mut validation = jwt::Validation::new(jwt::Algorithm::EdDSA);
        validation.set_issuer(&[JWT_ISS]);

        Ok(Self {
            encoding_key,
            decoding_key,
            header,
            validation,
        })
    }

    /// Issue a session token for `user`.
    pub(crate) fn new_token(&self, user: &User) -> Result<String, jwt::errors::Error> {
        self.token_with_exp(user, jwt::get_current_timestamp() + SESSION_LIFETIME)
    }

    fn token_with_exp(&self, user: &User, exp: u64) -> Result<String, jwt::errors::Error> {
        let claims = Claims {
            sub: user.email.clone(),
            role: user.role,
            department: user.department.clone(),
            iss: JWT_ISS.into(),
            exp,
        };

        jwt::encode(&self.header, &claims, &self.encoding_key)
    }

    /// Return the user a token was issued for, if the token is valid.
    pub(crate) fn user(&self, token: &str) -> Option<User> {
        jwt::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .ok()
            .map(|data| User {
                email: data.claims.sub,
                role: data.claims.role,
                department: data.claims.department,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authority() -> User {
        User {
            email: "pwd@kseb.localeyes.com".into(),
            role: Role::Authority,
            department: Some("PWD".into()),
        }
    }

    #[test]
    fn test_token_identifies_user() {
        let issuer = Issuer::new().unwrap();
        let token = issuer.new_token(&authority()).unwrap();

        assert_eq!(issuer.user(&token), Some(authority()));
    }

    #[test]
    fn test_token_from_other_issuer_is_rejected() {
        let issuer = Issuer::new().unwrap();
        let other = Issuer::new().unwrap();
        let token = other.new_token(&authority()).unwrap();

        assert_eq!(issuer.user(&token), None);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issuer = Issuer::new().unwrap();
        let token = issuer
            .token_with_exp(&authority(), jwt::get_current_timestamp() - 3600)
            .unwrap();

        assert_eq!(issuer.user(&token), None);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let issuer = Issuer::new().unwrap();
        assert_eq!(issuer.user("not-a-token"), None);
        assert_eq!(issuer.user(""), None);
    }
}
