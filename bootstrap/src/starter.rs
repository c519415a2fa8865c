//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, middleware};
use stock_config::AppConfig;
use stock_errors::AppResult;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::health::{HealthChecker, health_routes};
use crate::infrastructure::Infrastructure;
use crate::metrics::{MetricsRecorder, spawn_pool_metrics, track_http_metrics};
use crate::runtime::{init_runtime, shutdown_signal};

/// 连接池 metrics 采集间隔
const POOL_METRICS_INTERVAL: Duration = Duration::from_secs(15);

/// 运行 HTTP 服务
///
/// 所有服务的统一入口点：
/// 1. 加载 `.env` 与配置
/// 2. 初始化运行时（日志）
/// 3. 安装 Prometheus recorder
/// 4. 创建基础设施资源（数据库连接池，带重试）
/// 5. 调用闭包构建业务路由，合并 /health、/ready、/metrics
/// 6. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use stock_bootstrap::run_server;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_server("config", |infra| async move {
///         Ok(my_routes(infra))
///     })
///     .await
/// }
/// ```
pub async fn run_server<F, Fut>(
    config_dir: &str,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    dotenvy::dotenv().ok();

    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = Arc::new(MetricsRecorder::install()?);

    let infra = Infrastructure::from_config(config.clone()).await?;
    let pool_metrics = infra
        .postgres_pool()
        .map(|pool| spawn_pool_metrics(pool, POOL_METRICS_INTERVAL));

    let checker = Arc::new(HealthChecker::new(infra.clone()));
    let app = router_builder(infra)
        .await?
        .merge(health_routes(checker, metrics))
        .route_layer(middleware::from_fn(track_http_metrics))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = pool_metrics {
        handle.abort();
    }

    info!("Service stopped");

    Ok(())
}
