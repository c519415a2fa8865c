//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出

use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusHandle};
use sqlx::PgPool;
use stock_adapter_postgres::PoolStatus;
use stock_telemetry::init_metrics;
use tracing::debug;

/// Metrics 记录器
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus recorder
    pub fn install() -> Result<Self, BuildError> {
        Ok(Self {
            handle: init_metrics()?,
        })
    }

    /// 使用已有的 handle（不安装全局 recorder）
    pub fn from_handle(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 记录 HTTP 请求
pub fn record_http_request(method: &str, route: &str, status: u16, duration_ms: f64) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_ms", &labels).record(duration_ms);
}

/// HTTP 请求计量中间件
///
/// 以路由模板（如 `/products/{id}`）作为标签，避免按 ID 产生高基数序列
pub async fn track_http_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    record_http_request(&method, &route, response.status().as_u16(), duration_ms);

    response
}

/// 记录 PostgreSQL 连接池指标
pub fn record_postgres_pool_metrics(status: &PoolStatus) {
    gauge!("postgres_pool_size").set(status.size as f64);
    gauge!("postgres_pool_idle").set(status.idle as f64);
    gauge!("postgres_pool_active").set(status.active as f64);

    let utilization = if status.size > 0 {
        (status.active as f64 / status.size as f64) * 100.0
    } else {
        0.0
    };
    gauge!("postgres_pool_utilization").set(utilization);
}

/// 启动连接池 metrics 后台采集任务
pub fn spawn_pool_metrics(pool: PgPool, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            let status = PoolStatus::of(&pool);
            record_postgres_pool_metrics(&status);

            debug!(
                size = status.size,
                idle = status.idle,
                active = status.active,
                "Pool metrics collected"
            );
        }
    })
}
