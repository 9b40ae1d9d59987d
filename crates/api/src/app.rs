use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{drafts, health, jobs, locations, personnel};
use crate::services::autosave::{DbDraftSaver, DraftEditors, DraftSaver};
use persistence::repositories::JobDraftRepository;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// Live draft editors, keyed by editor id.
    pub editors: DraftEditors,
}

impl AppState {
    pub fn draft_saver(&self) -> Arc<dyn DraftSaver> {
        Arc::new(DbDraftSaver::new(JobDraftRepository::new(self.pool.clone())))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.autosave.debounce_ms)
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        editors: DraftEditors::default(),
    };

    // CORS: any origin in development, explicit list in production.
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        // Draft editing
        .route("/api/v1/drafts", post(drafts::open_draft))
        .route("/api/v1/drafts/resume/:draft_id", post(drafts::resume_draft))
        .route(
            "/api/v1/drafts/:editor_id",
            get(drafts::get_draft)
                .patch(drafts::update_draft)
                .delete(drafts::close_draft),
        )
        .route("/api/v1/drafts/:editor_id/tab", post(drafts::set_tab))
        .route(
            "/api/v1/drafts/:editor_id/finalize",
            post(drafts::finalize_draft),
        )
        // Jobs
        .route("/api/v1/jobs/:job_id", get(jobs::get_job))
        .route("/api/v1/jobs/:job_id/status", patch(jobs::update_status))
        .route("/api/v1/jobs/:job_id/candidates", get(jobs::list_candidates))
        .route("/api/v1/jobs/:job_id/assignments", post(jobs::assign_staff))
        .route(
            "/api/v1/jobs/:job_id/assignments/:personnel_id",
            delete(jobs::unassign_staff),
        )
        .route("/api/v1/jobs/:job_id/revise", post(jobs::revise_job))
        // Locations and staffing pool
        .route(
            "/api/v1/locations",
            get(locations::list_locations).post(locations::create_location),
        )
        .route("/api/v1/locations/:location_id", get(locations::get_location))
        .route(
            "/api/v1/personnel/candidates",
            get(personnel::list_candidates),
        );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
