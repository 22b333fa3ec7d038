use super::*;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;

/// Authentication and account error taxonomy.
///
/// Every failure on the account routes maps to an explicit HTTP status.
/// Nothing here may escape as a process-level fault.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no token")]
    Unauthorized,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("username already exists")]
    Conflict,
    #[error("malformed request")]
    Malformed,
    #[error("store unavailable: {0}")]
    StoreUnavailable(prl_pg::PgErr),
}

impl AuthError {
    /// Classifies a write-path store failure: a unique violation on the
    /// username column is a conflict, everything else is unavailability.
    pub fn from_store(e: prl_pg::PgErr) -> Self {
        match e.code() {
            Some(&tokio_postgres::error::SqlState::UNIQUE_VIOLATION) => Self::Conflict,
            _ => Self::StoreUnavailable(e),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        Self::Unauthorized
    }
}

impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Malformed => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(AuthError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::Malformed.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn token_errors_are_unauthorized() {
        let error = AuthError::from(TokenError::InvalidSignature);
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    }
}
