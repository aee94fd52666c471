//! Signed credential issue and verification.
//!
//! Credentials are compact JWTs signed with one symmetric algorithm. The
//! algorithm set is a deliberate allow-list, not a negotiation: a
//! credential declaring anything but HS256 is rejected before signature
//! validation, so a token cannot steer verification toward a different
//! scheme.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
    errors::ErrorKind, get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Issued credentials expire 24 hours after issuance.
pub const TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

const ALLOWED_ALGORITHMS: [Algorithm; 1] = [Algorithm::HS256];

/// Identity claims carried by a credential.
///
/// Valid only while `nbf <= now < exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal the credential asserts
    pub sub: String,
    /// Issued-at (Unix seconds)
    pub iat: u64,
    /// Not valid before (Unix seconds)
    pub nbf: u64,
    /// Expires at (Unix seconds)
    pub exp: u64,
}

/// Errors from credential issue or verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// No signing secret is configured. Startup validation makes this
    /// fatal before any request is served.
    #[error("signing secret is not configured")]
    MissingSecret,

    /// The credential cannot be decoded or parsed.
    #[error("malformed credential")]
    Malformed,

    /// The integrity tag does not match the encoded claims.
    #[error("credential signature mismatch")]
    SignatureMismatch,

    /// The credential is outside its validity window.
    #[error("credential expired or not yet valid")]
    Expired,

    /// The credential declares a signing algorithm outside the allow-list.
    #[error("unsupported signing algorithm")]
    UnsupportedAlgorithm,
}

/// Issues and verifies signed, time-bounded identity tokens.
///
/// Pure function of the secret and the claims; cheap to clone and safe to
/// call concurrently from any number of tasks.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec").finish_non_exhaustive()
    }
}

impl JwtCodec {
    /// Build a codec over the shared secret. An empty secret is refused;
    /// issuing or verifying without one is a configuration error.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, CredentialError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(CredentialError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// Issue a credential for `subject`, valid from now for 24 hours.
    pub fn issue(&self, subject: &str) -> Result<String, CredentialError> {
        let now = get_current_timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            nbf: now,
            exp: now + TOKEN_TTL_SECONDS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| CredentialError::Malformed)
    }

    /// Verify a credential and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, CredentialError> {
        let header = decode_header(token).map_err(|_| CredentialError::Malformed)?;
        if !ALLOWED_ALGORITHMS.contains(&header.alg) {
            return Err(CredentialError::UnsupportedAlgorithm);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| {
                debug!(subject = %data.claims.sub, "credential verified");
                data.claims
            })
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => {
                    CredentialError::Expired
                }
                ErrorKind::InvalidSignature => CredentialError::SignatureMismatch,
                ErrorKind::InvalidAlgorithm => CredentialError::UnsupportedAlgorithm,
                _ => CredentialError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> JwtCodec {
        JwtCodec::new("test-secret").unwrap()
    }

    fn encode_with(claims: &Claims, secret: &str, alg: Algorithm) -> String {
        encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_valid_now(sub: &str) -> Claims {
        let now = get_current_timestamp();
        Claims {
            sub: sub.to_string(),
            iat: now,
            nbf: now,
            exp: now + 3600,
        }
    }

    #[test]
    fn round_trip_preserves_subject() {
        let codec = codec();
        let token = codec.issue("alice").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn issued_lifetime_is_24_hours() {
        let codec = codec();
        let token = codec.issue("alice").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
        assert_eq!(claims.nbf, claims.iat);
    }

    #[test]
    fn empty_secret_is_refused() {
        assert_eq!(
            JwtCodec::new("").unwrap_err(),
            CredentialError::MissingSecret
        );
    }

    #[test]
    fn expired_credential_is_rejected() {
        let now = get_current_timestamp();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: now - 7200,
            nbf: now - 7200,
            exp: now - 3600,
        };
        let token = encode_with(&claims, "test-secret", Algorithm::HS256);

        assert_eq!(codec().verify(&token).unwrap_err(), CredentialError::Expired);
    }

    #[test]
    fn not_yet_valid_credential_is_rejected() {
        let now = get_current_timestamp();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: now,
            nbf: now + 3600,
            exp: now + 7200,
        };
        let token = encode_with(&claims, "test-secret", Algorithm::HS256);

        assert_eq!(codec().verify(&token).unwrap_err(), CredentialError::Expired);
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let token = encode_with(&claims_valid_now("alice"), "other-secret", Algorithm::HS256);

        assert_eq!(
            codec().verify(&token).unwrap_err(),
            CredentialError::SignatureMismatch
        );
    }

    #[test]
    fn tampered_claims_fail_signature_check() {
        let codec = codec();
        // Same header and signature layout, different claims payload: the
        // tag from the first token cannot cover the second's claims.
        let genuine = encode_with(&claims_valid_now("alice"), "test-secret", Algorithm::HS256);
        let other = encode_with(&claims_valid_now("mallory"), "test-secret", Algorithm::HS256);

        let signature = genuine.rsplit('.').next().unwrap();
        let mut parts: Vec<&str> = other.split('.').collect();
        parts[2] = signature;
        let spliced = parts.join(".");

        assert_eq!(
            codec.verify(&spliced).unwrap_err(),
            CredentialError::SignatureMismatch
        );
    }

    #[test]
    fn non_allow_listed_algorithm_is_rejected() {
        let token = encode_with(&claims_valid_now("alice"), "test-secret", Algorithm::HS384);

        assert_eq!(
            codec().verify(&token).unwrap_err(),
            CredentialError::UnsupportedAlgorithm
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            codec().verify("not-a-token").unwrap_err(),
            CredentialError::Malformed
        );
    }
}
