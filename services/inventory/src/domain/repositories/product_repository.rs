//! 产品仓储接口

use async_trait::async_trait;
use stock_errors::AppResult;
use stock_ports::Repository;

use crate::domain::entities::{Product, ProductDraft, ProductId};

/// 产品仓储接口
///
/// 在通用 [`Repository`] 之上补充 ID 分配与描述检索。
/// `delete` 对不存在的 ID 静默成功，存在性判断由调用方负责。
#[async_trait]
pub trait ProductRepository: Repository<Product, ProductId> {
    /// 新建记录并分配 ID
    async fn insert(&self, draft: &ProductDraft) -> AppResult<Product>;

    /// 按描述子串查找（忽略大小写），返回全部匹配
    async fn find_by_description(&self, text: &str) -> AppResult<Vec<Product>>;
}
