//! inventory Service - 产品库存 HTTP 服务

use std::sync::Arc;

use stock_bootstrap::{Infrastructure, run_server};
use stock_config::StoreBackend;
use stock_errors::{AppError, AppResult};
use tracing::info;

use inventory::api::routes;
use inventory::application::ProductInventoryService;
use inventory::domain::ProductRepository;
use inventory::infrastructure::persistence::{
    InMemoryProductRepository, PostgresProductRepository, run_migrations,
};

/// 按配置的后端创建产品仓储
async fn build_repository(infra: &Infrastructure) -> AppResult<Arc<dyn ProductRepository>> {
    match infra.backend() {
        StoreBackend::Postgres => {
            let pool = infra
                .postgres_pool()
                .ok_or_else(|| AppError::internal("PostgreSQL pool is not initialized"))?;

            if infra.config().database.run_migrations {
                run_migrations(&pool).await?;
            }

            Ok(Arc::new(PostgresProductRepository::new(pool)))
        }
        StoreBackend::Memory => Ok(Arc::new(InMemoryProductRepository::new())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_server("config", |infra: Infrastructure| async move {
        info!("Initializing inventory Service...");

        let repo = build_repository(&infra).await?;
        info!(backend = ?infra.backend(), "Product repository initialized");

        let service = Arc::new(ProductInventoryService::new(repo));
        Ok(routes(service))
    })
    .await
}
