//! Push webhook handlers.

use actix_web::HttpResponse;
use hookdeploy_core::use_cases::deploy::{ProcessPushDeliveryInterface, PushDelivery};
use shaku::HasComponent;
use tracing::error;

use crate::{
    metrics::{DEPLOYMENTS_FAILED, DEPLOYMENTS_SUCCEEDED},
    server::AppContext,
    Result,
};

#[tracing::instrument(skip_all, fields(body_size = body.len()))]
pub(crate) async fn push_event(
    ctx: &AppContext,
    signature: Option<&str>,
    body: &[u8],
) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();
    let process_push_delivery: &dyn ProcessPushDeliveryInterface =
        core_ctx.core_module.resolve_ref();

    let delivery = PushDelivery {
        signature: signature.map(ToOwned::to_owned),
        body: body.to_vec(),
    };

    match process_push_delivery.run(&core_ctx, delivery).await {
        Ok(report) => {
            DEPLOYMENTS_SUCCEEDED.inc();
            Ok(HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(report.to_string()))
        }
        Err(e) => {
            DEPLOYMENTS_FAILED.inc();
            error!(message = "Deployment failed", error = %e);
            Err(e.into())
        }
    }
}
