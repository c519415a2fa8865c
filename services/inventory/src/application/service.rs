//! 库存服务
//!
//! 读取、创建、更新、删除产品记录。更新与删除前先确认记录存在；
//! 存储层的错误原样向上传递，不做重试。

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use stock_errors::AppResult;
use tracing::{debug, info};

use crate::domain::{Product, ProductDraft, ProductId, ProductRepository};
use crate::error::InventoryError;

/// 库存服务接口
///
/// HTTP 层只依赖该 trait，便于替换实现
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// 按 ID 获取产品，不存在时返回 NotFound
    async fn get_by_id(&self, id: ProductId) -> AppResult<Product>;

    /// 全部产品，顺序由存储决定
    async fn list_all(&self) -> AppResult<Vec<Product>>;

    /// 描述包含给定文本（忽略大小写）的全部产品
    async fn get_by_description(&self, text: &str) -> AppResult<Vec<Product>>;

    /// 创建产品，ID 由存储分配
    async fn create(&self, draft: ProductDraft) -> AppResult<Product>;

    /// 覆盖描述、数量、价格，保留原 ID
    async fn update(&self, id: ProductId, draft: ProductDraft) -> AppResult<Product>;

    /// 删除产品，不存在时返回 NotFound
    async fn delete(&self, id: ProductId) -> AppResult<()>;
}

/// 基于 [`ProductRepository`] 的库存服务实现
///
/// 不缓存任何记录，每次调用都重新访问存储。
/// `update`/`delete` 是"先查后写"两步操作，两步之间的并发删除不做加锁保护。
pub struct ProductInventoryService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductInventoryService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    async fn fetch(&self, id: ProductId) -> AppResult<Product> {
        debug!(product_id = %id, "Getting product");

        let product = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or(InventoryError::ProductNotFound(id))?;

        Ok(product)
    }

    async fn replace(&self, id: ProductId, draft: ProductDraft) -> AppResult<Product> {
        info!(product_id = %id, "Updating product");

        // 不存在时在写入前失败
        let mut product = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or(InventoryError::ProductNotFound(id))?;

        product.apply(draft);
        let saved = self.repo.save(&product).await?;

        info!(product_id = %saved.id(), "Product updated");
        Ok(saved)
    }

    async fn remove(&self, id: ProductId) -> AppResult<()> {
        info!(product_id = %id, "Deleting product");

        // 存储的 delete 对缺失 ID 静默成功，必须先做存在性检查
        if !self.repo.exists(&id).await? {
            return Err(InventoryError::ProductNotFound(id).into());
        }

        self.repo.delete(&id).await?;

        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

#[async_trait]
impl InventoryService for ProductInventoryService {
    async fn get_by_id(&self, id: ProductId) -> AppResult<Product> {
        observe("get_by_id", self.fetch(id).await)
    }

    async fn list_all(&self) -> AppResult<Vec<Product>> {
        debug!("Listing products");
        observe("list_all", self.repo.find_all().await)
    }

    async fn get_by_description(&self, text: &str) -> AppResult<Vec<Product>> {
        debug!(description = %text, "Searching products by description");
        observe(
            "get_by_description",
            self.repo.find_by_description(text).await,
        )
    }

    async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        info!(description = %draft.description, "Creating product");

        let result = self.repo.insert(&draft).await;
        if let Ok(product) = &result {
            info!(product_id = %product.id(), "Product created");
        }
        observe("create", result)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> AppResult<Product> {
        observe("update", self.replace(id, draft).await)
    }

    async fn delete(&self, id: ProductId) -> AppResult<()> {
        observe("delete", self.remove(id).await)
    }
}

/// 记录操作结果计数
fn observe<T>(operation: &'static str, result: AppResult<T>) -> AppResult<T> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) if e.is_not_found() => "not_found",
        Err(_) => "error",
    };
    counter!(
        "inventory_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;
    use stock_errors::AppError;
    use stock_ports::Repository;

    mock! {
        pub ProductStore {}

        #[async_trait]
        impl Repository<Product, ProductId> for ProductStore {
            async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>>;
            async fn find_all(&self) -> AppResult<Vec<Product>>;
            async fn save(&self, entity: &Product) -> AppResult<Product>;
            async fn delete(&self, id: &ProductId) -> AppResult<()>;
            async fn exists(&self, id: &ProductId) -> AppResult<bool>;
        }

        #[async_trait]
        impl ProductRepository for ProductStore {
            async fn insert(&self, draft: &ProductDraft) -> AppResult<Product>;
            async fn find_by_description(&self, text: &str) -> AppResult<Vec<Product>>;
        }
    }

    fn product(id: i64, description: &str, quantity: i32, price: i32) -> Product {
        Product::new(ProductId(id), ProductDraft::new(description, quantity, price))
    }

    fn service(store: MockProductStore) -> ProductInventoryService {
        ProductInventoryService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_create_product() {
        let mut store = MockProductStore::new();
        store
            .expect_insert()
            .with(eq(ProductDraft::new("Violao", 10, 700)))
            .times(1)
            .returning(|draft| Ok(Product::new(ProductId(1), draft.clone())));

        let created = service(store)
            .create(ProductDraft::new("Violao", 10, 700))
            .await
            .unwrap();

        assert_eq!(created.id(), ProductId(1));
        assert_eq!(created.description(), "Violao");
        assert_eq!(created.quantity(), 10);
        assert_eq!(created.price(), 700);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let mut store = MockProductStore::new();
        store
            .expect_find_by_id()
            .with(eq(ProductId(2)))
            .times(1)
            .returning(|_| Ok(Some(product(2, "Guitarra", 5, 1500))));

        let found = service(store).get_by_id(ProductId(2)).await.unwrap();

        assert_eq!(found, product(2, "Guitarra", 5, 1500));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let mut store = MockProductStore::new();
        store.expect_find_by_id().returning(|_| Ok(None));

        let err = service(store).get_by_id(ProductId(99)).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Product 99 not found");
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_and_keeps_id() {
        let mut store = MockProductStore::new();
        store
            .expect_find_by_id()
            .with(eq(ProductId(1)))
            .times(1)
            .returning(|_| Ok(Some(product(1, "Violao", 10, 1300))));
        store
            .expect_save()
            .with(eq(product(1, "Guitarra", 5, 1500)))
            .times(1)
            .returning(|p| Ok(p.clone()));

        let updated = service(store)
            .update(ProductId(1), ProductDraft::new("Guitarra", 5, 1500))
            .await
            .unwrap();

        assert_eq!(updated, product(1, "Guitarra", 5, 1500));
    }

    #[tokio::test]
    async fn test_update_missing_product_never_writes() {
        let mut store = MockProductStore::new();
        store.expect_find_by_id().times(1).returning(|_| Ok(None));
        store.expect_save().never();

        let err = service(store)
            .update(ProductId(99), ProductDraft::new("Nova descricao", 10, 20))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_existing_product() {
        let mut store = MockProductStore::new();
        store
            .expect_exists()
            .with(eq(ProductId(1)))
            .times(1)
            .returning(|_| Ok(true));
        store
            .expect_delete()
            .with(eq(ProductId(1)))
            .times(1)
            .returning(|_| Ok(()));

        service(store).delete(ProductId(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_product_never_deletes() {
        let mut store = MockProductStore::new();
        store.expect_exists().times(1).returning(|_| Ok(false));
        store.expect_delete().never();

        let err = service(store).delete(ProductId(99)).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Product 99 not found");
    }

    #[tokio::test]
    async fn test_get_by_description_returns_all_matches() {
        let mut store = MockProductStore::new();
        store
            .expect_find_by_description()
            .with(eq("Guitarra"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    product(1, "Guitarra Fender", 2, 10000),
                    product(2, "Guitarra Gibson", 3, 15000),
                ])
            });

        let found = service(store).get_by_description("Guitarra").await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found[0].description().contains("Fender"));
        assert!(found[1].description().contains("Gibson"));
    }

    #[tokio::test]
    async fn test_get_by_description_empty() {
        let mut store = MockProductStore::new();
        store
            .expect_find_by_description()
            .with(eq("Piano"))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let found = service(store).get_by_description("Piano").await.unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_store_errors_propagate_unchanged() {
        let mut store = MockProductStore::new();
        store
            .expect_find_all()
            .times(1)
            .returning(|| Err(AppError::database("connection refused")));
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::database("disk full")));

        let service = service(store);

        let err = service.list_all().await.unwrap_err();
        assert!(matches!(err, AppError::Database(ref msg) if msg == "connection refused"));

        let err = service
            .create(ProductDraft::new("Violao", 10, 700))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(ref msg) if msg == "disk full"));
    }

    #[tokio::test]
    async fn test_existence_check_failure_is_not_reported_as_not_found() {
        let mut store = MockProductStore::new();
        store
            .expect_exists()
            .returning(|_| Err(AppError::database("timeout")));
        store.expect_delete().never();

        let err = service(store).delete(ProductId(1)).await.unwrap_err();

        assert!(!err.is_not_found());
        assert!(err.is_server_error());
    }
}
