//! 领域层
//!
//! 产品实体与仓储接口

pub mod entities;
pub mod repositories;

pub use entities::*;
pub use repositories::*;
