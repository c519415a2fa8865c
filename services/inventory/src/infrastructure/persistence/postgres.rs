//! PostgreSQL repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use stock_errors::{AppError, AppResult};
use stock_ports::Repository;

use crate::domain::{Product, ProductDraft, ProductId, ProductRepository};
use crate::error::InventoryError;

use super::rows::ProductRow;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 转义 LIKE 通配符，使检索文本按字面子串匹配
fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl Repository<Product, ProductId> for PostgresProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, description, quantity, price
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query product: {}", e)))?;

        Ok(row.map(Product::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, description, quantity, price
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn save(&self, product: &Product) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET description = $2, quantity = $3, price = $4
            WHERE id = $1
            RETURNING id, description, quantity, price
            "#,
        )
        .bind(product.id().0)
        .bind(product.description())
        .bind(product.quantity())
        .bind(product.price())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update product: {}", e)))?;

        // 检查与写入之间被并发删除
        let row = row.ok_or(InventoryError::ProductNotFound(product.id()))?;
        Ok(row.into())
    }

    async fn delete(&self, id: &ProductId) -> AppResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete product: {}", e)))?;

        Ok(())
    }

    async fn exists(&self, id: &ProductId) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(id.0)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to check product existence: {}", e))
                })?;

        Ok(result.0)
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, draft: &ProductDraft) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (description, quantity, price)
            VALUES ($1, $2, $3)
            RETURNING id, description, quantity, price
            "#,
        )
        .bind(&draft.description)
        .bind(draft.quantity)
        .bind(draft.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert product: {}", e)))?;

        Ok(row.into())
    }

    async fn find_by_description(&self, text: &str) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, description, quantity, price
            FROM products
            WHERE description ILIKE $1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(like_pattern(text))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to search products: {}", e)))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
