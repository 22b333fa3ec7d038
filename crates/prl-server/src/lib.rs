//! Unified backend server.
//!
//! Wires the account routes, the presence WebSocket, and health checking
//! into a single actix-web server. CORS is pinned to the one configured
//! client origin with credentials allowed, since the session cookie
//! travels cross-site.
//!
//! ## Configuration
//!
//! Read once at startup and injected into constructors:
//!
//! - `DB_URL` — PostgreSQL connection string
//! - `JWT_SECRET` — token signing secret
//! - `CLIENT_URL` — allowed CORS origin
//! - `BIND_ADDR` — listen address

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

async fn test() -> impl Responder {
    HttpResponse::Ok().json("test OK")
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let client = prl_pg::db().await;
    prl_pg::migrate::<prl_auth::Member>(&client)
        .await
        .expect("users schema");
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let origin = std::env::var("CLIENT_URL").expect("CLIENT_URL must be set");
    let crypto = web::Data::new(prl_auth::Crypto::new(secret.as_bytes()));
    let hasher = web::Data::new(prl_auth::Hasher::generate());
    let roster = web::Data::new(prl_presence::Roster::new());
    let client = web::Data::new(client);
    log::info!("starting parlor server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allowed_origin(&origin)
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
            )
            .app_data(crypto.clone())
            .app_data(hasher.clone())
            .app_data(roster.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .route("/test", web::get().to(test))
            .route("/profile", web::get().to(prl_auth::profile))
            .route("/login", web::post().to(prl_auth::login))
            .route("/register", web::post().to(prl_auth::register))
            .route("/ws", web::get().to(prl_presence::connect))
    })
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await
}
