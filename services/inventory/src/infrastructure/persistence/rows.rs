//! 数据库行映射结构

use sqlx::FromRow;

use crate::domain::{Product, ProductDraft, ProductId};

/// 产品数据库行
#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub description: String,
    pub quantity: i32,
    pub price: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::new(
            ProductId(row.id),
            ProductDraft {
                description: row.description,
                quantity: row.quantity,
                price: row.price,
            },
        )
    }
}
