//! Ping webhook handlers.

use actix_web::HttpResponse;
use hookdeploy_core::{use_cases::deploy::authenticate_delivery, DeployError};
use hookdeploy_models::types::GhPingEvent;
use tracing::{info, warn};

use crate::{server::AppContext, Result};

pub(crate) fn parse_ping_event(body: &[u8]) -> Result<GhPingEvent> {
    serde_json::from_slice(body).map_err(|e| DeployError::Decode { source: e }.into())
}

pub(crate) fn ping_event(
    ctx: &AppContext,
    signature: Option<&str>,
    body: &[u8],
) -> Result<HttpResponse> {
    authenticate_delivery(&ctx.config, signature, body).map_err(|e| {
        warn!(message = "Rejected ping event", error = %e);
        e
    })?;
    let event = parse_ping_event(body).map_err(|e| {
        warn!(message = "Invalid ping event", error = %e);
        e
    })?;

    if let Some(repo) = event.repository {
        info!(
            message = "Ping event from repository",
            repository_path = %repo.full_name,
            hook_id = event.hook_id
        );
    } else {
        info!("Ping event without repository");
    }

    Ok(HttpResponse::Ok().body("Ping."))
}
