use super::*;
use prl_auth::Claims;
use prl_auth::Crypto;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;

/// WebSocket entry point.
/// A missing or invalid token never rejects the upgrade: the connection
/// is seated unidentified and still receives presence updates.
pub async fn connect(
    roster: web::Data<Roster>,
    tokens: web::Data<Crypto>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let cookies = req
        .headers()
        .get(actix_web::http::header::COOKIE)
        .and_then(|h| h.to_str().ok());
    let user = prl_auth::resolve(tokens.get_ref(), cookies);
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            bridge(roster.into_inner(), user, session, stream);
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}

/// Seats the connection and spawns its pump: roster payloads flow down
/// the socket, and the inbound stream is watched for close. Either side
/// ending vacates the seat, which triggers the departure broadcast.
fn bridge(
    roster: Arc<Roster>,
    user: Option<Claims>,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
) {
    use futures::StreamExt;
    let (tx, mut rx) = unbounded_channel::<String>();
    actix_web::rt::spawn(async move {
        let id = roster.join(user, tx).await;
        log::debug!("[bridge] {} connected", id);
        'seat: loop {
            tokio::select! {
                biased;
                msg = rx.recv() => match msg {
                    Some(json) => if session.text(json).await.is_err() { break 'seat },
                    None => break 'seat,
                },
                msg = stream.next() => match msg {
                    Some(Ok(actix_ws::Message::Close(_))) => break 'seat,
                    Some(Ok(_)) => continue 'seat,
                    Some(Err(_)) => break 'seat,
                    None => break 'seat,
                },
            }
        }
        roster.leave(id).await;
        log::debug!("[bridge] {} disconnected", id);
    });
}
