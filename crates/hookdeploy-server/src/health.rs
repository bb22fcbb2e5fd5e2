use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use tracing::warn;

use crate::server::AppContext;

pub async fn health_check_route(ctx: web::Data<AppContext>) -> impl Responder {
    let git_status = match ctx.vcs_service.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(message = "Git health check failed", error = %e);
            false
        }
    };

    let mut remotes = serde_json::Map::new();
    let mut remotes_status = true;
    for session in &ctx.transfer_sessions {
        let status = match session.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    message = "Remote health check failed",
                    target = %session.target(),
                    error = %e
                );
                false
            }
        };

        remotes_status &= status;
        remotes.insert(session.target().to_string(), status.into());
    }

    let status_code = if git_status && remotes_status {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    HttpResponse::build(status_code).json(serde_json::json!({
        "git": git_status,
        "remotes": remotes,
    }))
}
