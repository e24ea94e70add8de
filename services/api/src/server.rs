use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ipcrf::catalog::CatalogService;
use ipcrf::config::AppConfig;
use ipcrf::error::AppError;
use ipcrf::records::RatingService;
use ipcrf::reviews::ReviewService;
use ipcrf::telemetry;
use tracing::{info, warn};

use crate::cli::ServeArgs;
use crate::infra::{
    seed_sample_teachers, seed_standard_catalog, AppState, InMemoryCatalogRepository,
    InMemoryRatingRepository, InMemorySubmissionRepository, InMemoryTeacherDirectory,
};
use crate::routes::{with_ipcrf_routes, PortalServices};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(CatalogService::new(Arc::new(
        InMemoryCatalogRepository::default(),
    )));
    let teachers = InMemoryTeacherDirectory::default();
    if config.environment.seeds_sample_data() {
        if let Err(err) = seed_standard_catalog(&catalog) {
            warn!(error = %err, "failed to seed the standard catalog");
        }
        seed_sample_teachers(&teachers);
    }

    let ratings = Arc::new(
        RatingService::new(
            Arc::new(InMemoryRatingRepository::default()),
            catalog.clone(),
            Arc::new(teachers),
        )
        .with_page_size(config.portal.page_size),
    );
    let reviews = Arc::new(ReviewService::new(Arc::new(
        InMemorySubmissionRepository::default(),
    )));

    let app = with_ipcrf_routes(PortalServices {
        catalog,
        ratings,
        reviews,
    })
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, page_size = config.portal.page_size, "IPCRF portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
