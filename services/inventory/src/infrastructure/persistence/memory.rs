//! 进程内产品仓储
//!
//! 用于测试与本地调试；ID 从 1 开始递增，删除后不复用

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use stock_errors::AppResult;
use stock_ports::Repository;
use tokio::sync::RwLock;

use crate::domain::{Product, ProductDraft, ProductId, ProductRepository};
use crate::error::InventoryError;

pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<ProductId, Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// 当前记录数
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Product, ProductId> for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn save(&self, product: &Product) -> AppResult<Product> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id()) {
            Some(existing) => {
                *existing = product.clone();
                Ok(product.clone())
            }
            None => Err(InventoryError::ProductNotFound(product.id()).into()),
        }
    }

    async fn delete(&self, id: &ProductId) -> AppResult<()> {
        self.products.write().await.remove(id);
        Ok(())
    }

    async fn exists(&self, id: &ProductId) -> AppResult<bool> {
        Ok(self.products.read().await.contains_key(id))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, draft: &ProductDraft) -> AppResult<Product> {
        let id = ProductId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let product = Product::new(id, draft.clone());

        self.products.write().await.insert(id, product.clone());
        Ok(product)
    }

    async fn find_by_description(&self, text: &str) -> AppResult<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|p| p.description_contains(text))
            .cloned()
            .collect())
    }
}
