//! Conference Gateway entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use conference_gateway::adapters::http::{build_router, AuthState};
use conference_gateway::adapters::identity::CognitoIdentityProvider;
use conference_gateway::adapters::proxy::{ProxyState, ReqwestBackendClient};
use conference_gateway::adapters::rate_limiter::{
    InMemoryResetRateLimiter, RedisResetRateLimiter, ResetLimits,
};
use conference_gateway::application::PasswordResetService;
use conference_gateway::config::AppConfig;
use conference_gateway::ports::{BackendClient, ResetRateLimiter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        "starting conference-gateway"
    );

    let limits = ResetLimits::from(&config.reset);
    let limiter: Arc<dyn ResetRateLimiter> = match &config.redis {
        Some(redis_config) => {
            let client = redis::Client::open(redis_config.url.as_str())?;
            let conn = client.get_multiplexed_tokio_connection().await?;
            info!("using Redis rate-limit store");
            Arc::new(RedisResetRateLimiter::new(conn, limits))
        }
        None => {
            warn!(
                "no Redis configured; using the in-memory rate-limit store, \
                 which does not share budgets across replicas"
            );
            Arc::new(InMemoryResetRateLimiter::new(limits))
        }
    };

    let provider = Arc::new(CognitoIdentityProvider::new(config.identity.clone())?);
    let reset_service = Arc::new(PasswordResetService::new(
        limiter,
        provider,
        config.reset.frontend_url.clone(),
    ));

    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
    let backend_client: Arc<dyn BackendClient> =
        Arc::new(ReqwestBackendClient::new(request_timeout)?);
    let proxy_state = ProxyState {
        table: Arc::new(config.services.route_table()),
        client: backend_client,
    };

    let app = build_router(AuthState { reset: reset_service }, proxy_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(request_timeout));

    let addr = config.server.socket_addr()?;
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(tower_http::cors::Any)
    }
}
