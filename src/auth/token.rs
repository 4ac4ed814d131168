//! Defines the bearer token contents and how tokens are signed and verified.

use email_address::EmailAddress;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    models::{UserID, UserProfile},
};

/// How long a bearer token stays valid after being issued.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::days(7);

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the user the token was issued to.
    pub sub: i64,
    /// The email of the user the token was issued to.
    pub email: String,
    /// The time the token was issued, as a unix timestamp.
    pub iat: usize,
    /// The expiry time of the token, as a unix timestamp.
    pub exp: usize,
}

/// The response payload for successful registration and log-in requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// A signed bearer token for the authenticated user.
    pub token: String,
    /// The authenticated user's profile.
    pub user: UserProfile,
}

/// Create a signed bearer token for the user that expires after `duration`.
///
/// # Errors
///
/// This function will return [Error::TokenCreation] if the token could not be
/// signed.
pub fn encode_token(
    user_id: UserID,
    email: &EmailAddress,
    encoding_key: &EncodingKey,
    duration: Duration,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.as_i64(),
        email: email.to_string(),
        iat: now.unix_timestamp() as usize,
        exp: (now + duration).unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|error| {
        tracing::error!("Error signing token: {error}");
        Error::TokenCreation
    })
}

/// Verify a bearer token and return its claims.
///
/// # Errors
///
/// This function will return [Error::InvalidToken] if the token is malformed,
/// has a bad signature, or has expired.
pub fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|_| Error::InvalidToken)
}

#[cfg(test)]
mod token_tests {
    use std::str::FromStr;

    use email_address::EmailAddress;
    use jsonwebtoken::{DecodingKey, EncodingKey};
    use time::Duration;

    use crate::{Error, models::UserID};

    use super::{DEFAULT_TOKEN_DURATION, decode_token, encode_token};

    fn get_keys(secret: &str) -> (EncodingKey, DecodingKey) {
        (
            EncodingKey::from_secret(secret.as_bytes()),
            DecodingKey::from_secret(secret.as_bytes()),
        )
    }

    #[test]
    fn decode_returns_claims_from_encode() {
        let (encoding_key, decoding_key) = get_keys("foobar");
        let email = EmailAddress::from_str("averyemail@email.com").unwrap();

        let token = encode_token(
            UserID::new(42),
            &email,
            &encoding_key,
            DEFAULT_TOKEN_DURATION,
        )
        .unwrap();
        let claims = decode_token(&token, &decoding_key).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "averyemail@email.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn decode_fails_with_wrong_key() {
        let (encoding_key, _) = get_keys("foobar");
        let (_, wrong_key) = get_keys("bazqux");
        let email = EmailAddress::from_str("averyemail@email.com").unwrap();

        let token = encode_token(
            UserID::new(42),
            &email,
            &encoding_key,
            DEFAULT_TOKEN_DURATION,
        )
        .unwrap();

        assert_eq!(
            decode_token(&token, &wrong_key).unwrap_err(),
            Error::InvalidToken
        );
    }

    #[test]
    fn decode_fails_with_expired_token() {
        let (encoding_key, decoding_key) = get_keys("foobar");
        let email = EmailAddress::from_str("averyemail@email.com").unwrap();

        // Expired beyond the default validation leeway.
        let token = encode_token(
            UserID::new(42),
            &email,
            &encoding_key,
            Duration::minutes(-5),
        )
        .unwrap();

        assert_eq!(
            decode_token(&token, &decoding_key).unwrap_err(),
            Error::InvalidToken
        );
    }

    #[test]
    fn decode_fails_with_garbage() {
        let (_, decoding_key) = get_keys("foobar");

        assert_eq!(
            decode_token("definitely.not.ajwt", &decoding_key).unwrap_err(),
            Error::InvalidToken
        );
    }
}
