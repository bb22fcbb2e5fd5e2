//! Webhook handlers.

mod ping;
mod push;


use std::convert::TryFrom;

use actix_web::{web, HttpRequest, HttpResponse};
use hookdeploy_core::use_cases::deploy::authenticate_delivery;
use tracing::warn;

use crate::{
    constants::{GITHUB_EVENT_HEADER, GITHUB_SIGNATURE_HEADER},
    event_type::EventType,
    server::AppContext,
    Result, ServerError,
};

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|x| x.to_str().ok())
}

#[tracing::instrument(skip_all, fields(event_type))]
pub(crate) async fn event_handler(
    req: HttpRequest,
    body: web::Bytes,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse> {
    let signature = header_value(&req, GITHUB_SIGNATURE_HEADER);

    // Deliveries without event header are handled as pushes.
    let event_name = header_value(&req, GITHUB_EVENT_HEADER).unwrap_or("push");
    tracing::Span::current().record("event_type", event_name);

    match EventType::try_from(event_name) {
        Ok(EventType::Push) => push::push_event(&ctx, signature, &body).await,
        Ok(EventType::Ping) => ping::ping_event(&ctx, signature, &body),
        Err(_) => unhandled_event(&ctx, event_name, signature, &body),
    }
}

pub(crate) fn unhandled_event(
    ctx: &AppContext,
    event_name: &str,
    signature: Option<&str>,
    body: &[u8],
) -> Result<HttpResponse> {
    authenticate_delivery(&ctx.config, signature, body).map_err(|e| {
        warn!(
            message = "Rejected unhandled event",
            event_type = event_name,
            error = %e
        );
        e
    })?;

    warn!(message = "Unhandled event", event_type = event_name);
    Err(ServerError::UnhandledEvent {
        event: event_name.to_owned(),
    })
}

/// Configure webhook handlers.
pub fn configure_webhook_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/copy").route(web::post().to(event_handler)));
}
