//! 基础设施资源管理
//!
//! 统一管理服务共享的基础设施资源

use secrecy::ExposeSecret;
use sqlx::PgPool;
use stock_adapter_postgres::{PostgresConfig, create_pool};
use stock_config::{AppConfig, StoreBackend};
use stock_errors::AppResult;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
///
/// 由 bootstrap 统一初始化；内存后端时不持有连接池
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: Option<PgPool>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let postgres_pool = match config.database.backend {
            StoreBackend::Postgres => {
                let pg_config = PostgresConfig::new(config.database.url.expose_secret())
                    .with_max_connections(config.database.max_connections);

                let pool = with_retry(&RetryConfig::default(), "PostgreSQL connection", || {
                    let cfg = pg_config.clone();
                    async move { create_pool(&cfg).await }
                })
                .await?;

                info!(
                    max_connections = config.database.max_connections,
                    "PostgreSQL connection pool created"
                );
                Some(pool)
            }
            StoreBackend::Memory => {
                info!("Using in-memory store, PostgreSQL is not connected");
                None
            }
        };

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    /// 不连接任何外部资源（内存后端 / 测试）
    pub fn without_database(config: AppConfig) -> Self {
        Self {
            config,
            postgres_pool: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn backend(&self) -> StoreBackend {
        self.config.database.backend
    }

    /// PostgreSQL 连接池（内存后端时为 None）
    pub fn postgres_pool(&self) -> Option<PgPool> {
        self.postgres_pool.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use stock_config::{DatabaseConfig, ServerConfig, TelemetryConfig};

    fn memory_config() -> AppConfig {
        AppConfig {
            app_name: "inventory".to_string(),
            app_env: "test".to_string(),
            database: DatabaseConfig {
                url: Secret::new(String::new()),
                max_connections: 1,
                run_migrations: false,
                backend: StoreBackend::Memory,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                request_timeout_secs: 5,
            },
            telemetry: TelemetryConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_memory_backend_has_no_pool() {
        let infra = Infrastructure::from_config(memory_config()).await.unwrap();

        assert_eq!(infra.backend(), StoreBackend::Memory);
        assert!(infra.postgres_pool().is_none());
        assert_eq!(infra.config().app_name, "inventory");
    }

    #[test]
    fn test_without_database() {
        let infra = Infrastructure::without_database(memory_config());
        assert!(infra.postgres_pool().is_none());
    }
}
