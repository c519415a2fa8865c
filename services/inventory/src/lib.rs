//! 产品库存服务
//!
//! 按 ID 或描述查询产品，创建、更新、删除产品记录。
//! 存储可选 PostgreSQL 或进程内实现，通过 `database.backend` 配置切换。

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
