use super::*;
use prl_core::ID;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;

/// Name of the session cookie on both HTTP requests and WS handshakes.
pub const TOKEN_COOKIE: &str = "token";

/// Extractor for authenticated requests.
/// Reads the session cookie and validates the JWT before any handler
/// logic runs; missing or invalid tokens short-circuit to 401.
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn user(&self) -> ID<Member> {
        self.0.user()
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = (|| {
            let tokens = req.app_data::<web::Data<Crypto>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("token service not configured")
            })?;
            let cookie = req
                .cookie(TOKEN_COOKIE)
                .ok_or(AuthError::Unauthorized)?;
            let claims = tokens.decode(cookie.value()).map_err(AuthError::from)?;
            Ok(Auth(claims))
        })();
        std::future::ready(result)
    }
}

/// Pulls the session token out of a raw Cookie header line.
/// WebSocket handshakes surface cookies unparsed, so this is shared by
/// the upgrade path rather than going through the actix cookie jar.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(TOKEN_COOKIE)?.strip_prefix('='))
        .filter(|token| !token.is_empty())
}

/// Session resolution for the WebSocket handshake.
/// Absent or invalid tokens degrade the connection to unidentified
/// instead of rejecting it; failures are logged, never swallowed.
pub fn resolve(tokens: &Crypto, header: Option<&str>) -> Option<Claims> {
    let token = header.and_then(token_from_cookie_header)?;
    match tokens.decode(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            log::warn!("[session] handshake token rejected: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_found_among_cookies() {
        let header = "theme=dark; token=abc.def.ghi; lang=en";
        assert_eq!(token_from_cookie_header(header), Some("abc.def.ghi"));
    }

    #[test]
    fn token_alone() {
        assert_eq!(token_from_cookie_header("token=xyz"), Some("xyz"));
    }

    #[test]
    fn no_token_cookie() {
        assert_eq!(token_from_cookie_header("theme=dark; lang=en"), None);
        assert_eq!(token_from_cookie_header(""), None);
    }

    #[test]
    fn empty_token_value() {
        assert_eq!(token_from_cookie_header("token="), None);
    }

    #[test]
    fn similar_names_do_not_match() {
        assert_eq!(token_from_cookie_header("tokens=abc"), None);
    }

    #[test]
    fn resolve_degrades_on_bad_token() {
        let tokens = Crypto::new(b"test-secret");
        assert!(resolve(&tokens, None).is_none());
        assert!(resolve(&tokens, Some("token=forged.jwt.blob")).is_none());
    }

    #[test]
    fn resolve_accepts_valid_token() {
        let tokens = Crypto::new(b"test-secret");
        let claims = Claims::new(ID::default(), "alice".to_string());
        let header = format!("token={}", tokens.encode(&claims).unwrap());
        assert_eq!(resolve(&tokens, Some(&header)), Some(claims));
    }
}
