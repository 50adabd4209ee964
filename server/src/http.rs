use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use platform_api::{ApiError, ApiJson, ApiPath, ApiResult};
use platform_db::DbPool;
use products_hr::{Employee, EmployeeChanges, EmployeeService, NewEmployee};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::config::AppConfig;

const DELETED_MESSAGE: &str = "Employee deleted successfully!";

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub employees: EmployeeService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Arc<AppConfig>) -> Self {
        Self {
            employees: EmployeeService::from_pool(pool.clone()),
            pool,
            config,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "employee server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/employees",
            get(list_employees).post(create_employee),
        )
        .route(
            "/api/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn create_employee(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewEmployee>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let saved = state.employees.create(input).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(state.employees.list().await?))
}

async fn get_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Employee>> {
    state
        .employees
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn update_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<EmployeeChanges>,
) -> ApiResult<Json<Employee>> {
    state
        .employees
        .update_if_exists(id, changes)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn delete_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<&'static str> {
    state.employees.delete(id).await?;
    Ok(DELETED_MESSAGE)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = platform_db::ping(&state.pool).await;
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
