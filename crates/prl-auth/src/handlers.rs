use super::*;
use prl_core::ID;
use prl_core::Unique;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::ResponseError;
use actix_web::cookie::Cookie;
use actix_web::cookie::SameSite;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

/// Session cookie attached on successful login and registration.
/// SameSite=None + Secure because the client lives on another origin.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .same_site(SameSite::None)
        .secure(true)
        .path("/")
        .finish()
}

pub async fn register(
    db: web::Data<Arc<Client>>,
    tokens: web::Data<Crypto>,
    hasher: web::Data<Hasher>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    if req.username.len() < 3 || req.username.len() > 32 {
        return HttpResponse::BadRequest().body("username must be 3-32 characters");
    }
    if req.password.len() < 8 {
        return HttpResponse::BadRequest().body("password must be at least 8 characters");
    }
    match db.exists(&req.username).await {
        Ok(false) => {}
        Ok(true) => return AuthError::Conflict.error_response(),
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    }
    let hashword = match hasher.hash(&req.password) {
        Ok(h) => h,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    let member = Member::new(ID::default(), req.username.clone());
    // the exists pre-check races with concurrent registration, so the
    // unique constraint is still the authority here
    if let Err(e) = db.create(&member, &hashword).await {
        return AuthError::from_store(e).error_response();
    }
    let claims = Claims::new(member.id(), member.username().to_string());
    let token = match tokens.encode(&claims) {
        Ok(t) => t,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    log::info!("[auth] registered {}", member.username());
    HttpResponse::Created()
        .cookie(session_cookie(token))
        .json(AuthResponse {
            id: member.id().to_string(),
        })
}

pub async fn login(
    db: web::Data<Arc<Client>>,
    tokens: web::Data<Crypto>,
    req: web::Json<LoginRequest>,
) -> impl Responder {
    let (member, hashword) = match db.lookup(&req.username).await {
        Ok(Some(row)) => row,
        Ok(None) => return AuthError::InvalidCredentials.error_response(),
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    if !password::verify(&req.password, &hashword) {
        return AuthError::InvalidCredentials.error_response();
    }
    let claims = Claims::new(member.id(), member.username().to_string());
    let token = match tokens.encode(&claims) {
        Ok(t) => t,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    log::info!("[auth] login {}", member.username());
    HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(AuthResponse {
            id: member.id().to_string(),
        })
}

pub async fn profile(auth: Auth) -> impl Responder {
    HttpResponse::Ok().json(auth.claims())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_cross_site() {
        let cookie = session_cookie("abc".to_string());
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.secure(), Some(true));
    }
}
