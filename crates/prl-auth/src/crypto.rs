use super::*;

/// Errors surfaced when a token cannot be decoded or verified.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token signature invalid")]
    InvalidSignature,
    #[error("token malformed")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed,
        }
    }
}

/// JWT signing and verification.
///
/// The secret is injected at construction and owned here, never read from
/// ambient globals after startup.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    validation: jsonwebtoken::Validation,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        // tokens carry no exp claim, so expiry validation must be off
        let mut validation = jsonwebtoken::Validation::default();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            validation,
        }
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
            .map_err(TokenError::from)
    }
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
}
