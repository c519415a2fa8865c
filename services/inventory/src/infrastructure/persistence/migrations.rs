//! 产品表迁移

use sqlx::PgPool;
use stock_adapter_postgres::{Migration, MigrationManager, MigrationReport};
use stock_errors::AppResult;
use tracing::info;

/// 本服务的全部迁移，按版本号递增
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "create_products",
        include_str!("../../../migrations/0001_create_products.sql"),
    )]
}

/// 应用待执行的迁移
pub async fn run_migrations(pool: &PgPool) -> AppResult<MigrationReport> {
    let report = MigrationManager::new(pool.clone())
        .migrate(&migrations())
        .await?;

    info!(
        applied = report.applied_count(),
        skipped = report.skipped.len(),
        "Database migrations finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_versions_are_unique_and_ordered() {
        let all = migrations();
        let versions: Vec<i64> = all.iter().map(|m| m.version).collect();

        let mut sorted = versions.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }

    #[test]
    fn test_products_table_migration() {
        let all = migrations();
        assert!(all[0].sql.contains("CREATE TABLE IF NOT EXISTS products"));
    }

    #[sqlx::test(migrations = false)]
    async fn test_second_run_skips_applied_versions(pool: PgPool) {
        let first = run_migrations(&pool).await.unwrap();
        assert_eq!(first.applied, vec![1]);

        let second = run_migrations(&pool).await.unwrap();
        assert!(second.applied.is_empty());
        assert_eq!(second.skipped, vec![1]);
    }
}
