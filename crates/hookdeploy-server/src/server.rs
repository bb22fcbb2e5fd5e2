//! Server module.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use hookdeploy_config::Config;
use hookdeploy_core::{CoreContext, CoreModule, WorkingCopyLocks};
use hookdeploy_transfer_interface::TransferSession;
use hookdeploy_vcs_interface::VcsService;
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    health::health_check_route, metrics::build_metrics_handler, transfer::MetricsTransferSession,
    vcs::MetricsVcsService, webhook::configure_webhook_handlers, Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// VCS adapter.
    pub vcs_service: Box<dyn VcsService>,
    /// One session per remote target.
    pub transfer_sessions: Vec<Box<dyn TransferSession>>,
    /// Working copy locks.
    pub working_copy_locks: WorkingCopyLocks,
}

impl AppContext {
    /// Create new app context, using git and the given sessions.
    pub fn new(
        config: Config,
        core_module: CoreModule,
        transfer_sessions: Vec<Box<dyn TransferSession>>,
    ) -> Self {
        let vcs_service = Box::new(MetricsVcsService::new(&config));
        Self::new_with_adapters(config, core_module, vcs_service, transfer_sessions)
    }

    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        vcs_service: Box<dyn VcsService>,
        transfer_sessions: Vec<Box<dyn TransferSession>>,
    ) -> Self {
        Self {
            config,
            core_module,
            vcs_service,
            transfer_sessions: transfer_sessions
                .into_iter()
                .map(|s| Box::new(MetricsTransferSession::wrap(s)) as Box<dyn TransferSession>)
                .collect(),
            working_copy_locks: WorkingCopyLocks::new(),
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            vcs_service: self.vcs_service.as_ref(),
            transfer_sessions: &self.transfer_sessions,
            working_copy_locks: &self.working_copy_locks,
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    prometheus: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let max_payload_size = context.config.server.max_payload_size;

    App::new()
        .app_data(context)
        .app_data(web::PayloadConfig::new(max_payload_size))
        .wrap(prometheus)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .service(web::scope("/webhook").configure(configure_webhook_handlers))
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on hookdeploy!" }))
            }),
        )
}

/// Run deployment server.
pub async fn run_deploy_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        targets = context.transfer_sessions.len(),
        message = "Starting deployment server",
    );

    run_deploy_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_deploy_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let workers_count = context.config.server.workers_count;
    let prometheus = build_metrics_handler()?;

    let mut server =
        HttpServer::new(move || build_actix_app(context.clone(), prometheus.clone()));

    if let Some(workers) = workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
