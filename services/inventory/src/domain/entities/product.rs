//! 产品实体

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 产品 ID，由存储在创建时分配
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct ProductId(pub i64);

/// 产品的可变字段
///
/// 创建与更新共用的载荷，不含 ID。数量与价格不做下限校验。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub description: String,
    pub quantity: i32,
    pub price: i32,
}

impl ProductDraft {
    pub fn new(description: impl Into<String>, quantity: i32, price: i32) -> Self {
        Self {
            description: description.into(),
            quantity,
            price,
        }
    }
}

/// 产品实体
///
/// `id` 创建后不可变；更新只覆盖 `description`、`quantity`、`price`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    description: String,
    quantity: i32,
    price: i32,
}

impl Product {
    /// 由已分配的 ID 与字段组装实体（仓储层使用）
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            description: draft.description,
            quantity: draft.quantity,
            price: draft.price,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    /// 用载荷覆盖全部可变字段，ID 保持不变
    pub fn apply(&mut self, draft: ProductDraft) {
        self.description = draft.description;
        self.quantity = draft.quantity;
        self.price = draft.price;
    }

    /// 当前可变字段的快照
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            description: self.description.clone(),
            quantity: self.quantity,
            price: self.price,
        }
    }

    /// 描述是否包含给定文本（忽略大小写）
    pub fn description_contains(&self, needle: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_mutable_fields_only() {
        let mut product = Product::new(ProductId(1), ProductDraft::new("Violao", 10, 1300));

        product.apply(ProductDraft::new("Guitarra", 5, 1500));

        assert_eq!(product.id(), ProductId(1));
        assert_eq!(product.description(), "Guitarra");
        assert_eq!(product.quantity(), 5);
        assert_eq!(product.price(), 1500);
    }

    #[test]
    fn test_negative_values_are_kept() {
        let product = Product::new(ProductId(3), ProductDraft::new("Cabo", -2, -10));
        assert_eq!(product.quantity(), -2);
        assert_eq!(product.price(), -10);
    }

    #[test]
    fn test_description_contains_ignores_case() {
        let product = Product::new(ProductId(2), ProductDraft::new("Guitarra Fender", 2, 10000));

        assert!(product.description_contains("guitarra"));
        assert!(product.description_contains("FENDER"));
        assert!(product.description_contains("ra Fe"));
        assert!(product.description_contains(""));
        assert!(!product.description_contains("Gibson"));
    }

    #[test]
    fn test_description_contains_folds_non_ascii() {
        let product = Product::new(ProductId(4), ProductDraft::new("CAFÉ Pilão", 1, 10));

        assert!(product.description_contains("café"));
        assert!(product.description_contains("PILÃO"));
    }

    #[test]
    fn test_serialization_shape() {
        let product = Product::new(ProductId(7), ProductDraft::new("Violao", 10, 700));
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 7, "description": "Violao", "quantity": 10, "price": 700})
        );
    }
}
