//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::middleware::{normalize_error_response, ObservabilityLayer};
use crate::migration;
use crate::repository::{
    seizure::SeizureRepositoryImpl, slaughterhouse::SlaughterhouseRepositoryImpl,
    user::UserRepositoryImpl,
};
use crate::service::{
    AnalyticsService, AuthService, SeizureService, SlaughterhouseService, UserService,
};
use crate::state::HasServices;
use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub auth_service: Arc<AuthService<UserRepositoryImpl>>,
    pub user_service: Arc<UserService<UserRepositoryImpl, SlaughterhouseRepositoryImpl>>,
    pub slaughterhouse_service:
        Arc<SlaughterhouseService<SlaughterhouseRepositoryImpl, SeizureRepositoryImpl>>,
    pub seizure_service: Arc<SeizureService<SeizureRepositoryImpl>>,
    pub analytics_service: Arc<AnalyticsService<SeizureRepositoryImpl>>,
}

impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type SlaughterhouseRepo = SlaughterhouseRepositoryImpl;
    type SeizureRepo = SeizureRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn auth_service(&self) -> &AuthService<Self::UserRepo> {
        &self.auth_service
    }

    fn user_service(&self) -> &UserService<Self::UserRepo, Self::SlaughterhouseRepo> {
        &self.user_service
    }

    fn slaughterhouse_service(
        &self,
    ) -> &SlaughterhouseService<Self::SlaughterhouseRepo, Self::SeizureRepo> {
        &self.slaughterhouse_service
    }

    fn seizure_service(&self) -> &SeizureService<Self::SeizureRepo> {
        &self.seizure_service
    }

    fn analytics_service(&self) -> &AnalyticsService<Self::SeizureRepo> {
        &self.analytics_service
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.db_pool)
            .await
            .is_ok()
    }
}

/// Run migrations, seed the bootstrap admin and serve HTTP until Ctrl-C
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    migration::run_migrations(&config).await?;

    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");

    let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
    let slaughterhouse_repo = Arc::new(SlaughterhouseRepositoryImpl::new(db_pool.clone()));
    let seizure_repo = Arc::new(SeizureRepositoryImpl::new(db_pool.clone()));

    if let Some(admin) = config.bootstrap_admin.as_ref() {
        migration::seed_bootstrap_admin(user_repo.as_ref(), admin).await?;
    }

    let jwt_manager = JwtManager::new(config.jwt.clone());

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        auth_service: Arc::new(AuthService::new(user_repo.clone(), jwt_manager)),
        user_service: Arc::new(UserService::new(user_repo, slaughterhouse_repo.clone())),
        slaughterhouse_service: Arc::new(SlaughterhouseService::new(
            slaughterhouse_repo,
            seizure_repo.clone(),
        )),
        seizure_service: Arc::new(SeizureService::new(seizure_repo.clone())),
        analytics_service: Arc::new(AnalyticsService::new(seizure_repo)),
    };

    let app = build_router(state, prometheus_handle);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("Failed to bind {}", http_addr))?;
    info!("HTTP server started on {}", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the HTTP router with generic state type
///
/// Generic over the state so tests can drive the production routes with
/// in-memory repositories.
pub fn build_router<S: HasServices>(state: S, prometheus_handle: Option<PrometheusHandle>) -> Router {
    let cors = cors_layer(&state.config().cors_allowed_origins);

    let metrics_router = Router::new()
        .route("/metrics", get(api::health::metrics_handler))
        .with_state(Arc::new(prometheus_handle));

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route("/api", get(api::health::root))
        .route("/api/", get(api::health::root))
        // Auth
        .route("/api/auth/login", post(api::auth::login::<S>))
        // Users
        .route(
            "/api/users",
            get(api::user::list::<S>).post(api::user::create::<S>),
        )
        .route("/api/users/me", get(api::user::me))
        // Slaughterhouses
        .route(
            "/api/slaughterhouses",
            get(api::slaughterhouse::list::<S>).post(api::slaughterhouse::create::<S>),
        )
        .route(
            "/api/slaughterhouses/{id}",
            get(api::slaughterhouse::get::<S>)
                .put(api::slaughterhouse::update::<S>)
                .delete(api::slaughterhouse::delete::<S>),
        )
        // Seizures
        .route(
            "/api/seizures",
            get(api::seizure::list::<S>).post(api::seizure::create::<S>),
        )
        .route(
            "/api/seizures/{id}",
            get(api::seizure::get::<S>).delete(api::seizure::delete::<S>),
        )
        // Analytics
        .route("/api/analytics/summary", get(api::analytics::summary::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(axum::middleware::from_fn(normalize_error_response))
        .layer(TraceLayer::new_for_http())
        .layer(ObservabilityLayer)
        .layer(cors)
}
