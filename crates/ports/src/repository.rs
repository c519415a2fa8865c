//! Repository trait 定义

use async_trait::async_trait;
use stock_errors::AppResult;

/// 基础 Repository trait
///
/// 实现方负责自身的并发安全；调用方不持有跨调用的缓存。
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// 根据 ID 查找
    async fn find_by_id(&self, id: &ID) -> AppResult<Option<T>>;

    /// 查询全部，顺序由存储决定
    async fn find_all(&self) -> AppResult<Vec<T>>;

    /// 保存实体（按 ID 覆盖已有记录），返回持久化后的实体
    async fn save(&self, entity: &T) -> AppResult<T>;

    /// 删除实体；目标不存在时静默成功
    async fn delete(&self, id: &ID) -> AppResult<()>;

    /// 检查是否存在
    async fn exists(&self, id: &ID) -> AppResult<bool>;
}
