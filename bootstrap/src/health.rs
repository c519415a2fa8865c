//! 健康检查模块
//!
//! 提供 /health、/ready 和 /metrics 端点

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use stock_adapter_postgres::check_connection;
use stock_telemetry::HealthStatus;

use crate::Infrastructure;
use crate::metrics::MetricsRecorder;

/// 健康检查器
pub struct HealthChecker {
    infra: Infrastructure,
}

impl HealthChecker {
    pub fn new(infra: Infrastructure) -> Self {
        Self { infra }
    }

    /// 存活检查（liveness），不检查依赖
    pub async fn liveness(&self) -> HealthStatus {
        HealthStatus::new()
    }

    /// 就绪检查（readiness），检查存储是否可用
    pub async fn readiness(&self) -> HealthStatus {
        let mut status = HealthStatus::new();

        match self.infra.postgres_pool() {
            Some(pool) => match check_connection(&pool).await {
                Ok(()) => status.add_check("postgres", true, None),
                Err(e) => status.add_check("postgres", false, Some(e.to_string())),
            },
            None => status.add_check("store", true, Some("in-memory".to_string())),
        }

        status
    }
}

#[derive(Clone)]
struct HealthState {
    checker: Arc<HealthChecker>,
    metrics: Arc<MetricsRecorder>,
}

/// 健康检查与 metrics 路由，由服务路由合并
pub fn health_routes(checker: Arc<HealthChecker>, metrics: Arc<MetricsRecorder>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(HealthState { checker, metrics })
}

async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.checker.liveness().await))
}

async fn ready_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let status = state.checker.readiness().await;
    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn metrics_handler(State(state): State<HealthState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}
