//! 服务错误定义

use stock_errors::AppError;
use thiserror::Error;

use crate::domain::ProductId;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::ProductNotFound(_) => AppError::not_found(err.to_string()),
        }
    }
}
