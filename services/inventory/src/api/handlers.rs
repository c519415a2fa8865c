//! 产品 HTTP 处理器
//!
//! 只负责提取参数与选择状态码，业务判断全部交给 [`InventoryService`]。
//! 提取失败经 `?` 转为 `AppError::Validation`，与其他错误同为 problem+json。

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Deserialize;
use stock_errors::AppResult;

use crate::application::InventoryService;
use crate::domain::{Product, ProductDraft, ProductId};

pub type SharedService = Arc<dyn InventoryService>;

/// 描述检索参数
#[derive(Debug, Deserialize)]
pub struct DescriptionQuery {
    pub description: String,
}

pub async fn list_products(State(service): State<SharedService>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(service.list_all().await?))
}

pub async fn get_product(
    State(service): State<SharedService>,
    path: Result<Path<ProductId>, PathRejection>,
) -> AppResult<Json<Product>> {
    let Path(id) = path?;
    Ok(Json(service.get_by_id(id).await?))
}

pub async fn search_products(
    State(service): State<SharedService>,
    query: Result<Query<DescriptionQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    Ok(Json(service.get_by_description(&query.description).await?))
}

pub async fn create_product(
    State(service): State<SharedService>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(draft) = payload?;
    let product = service.create(draft).await?;
    let location = format!("/products/{}", product.id());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

pub async fn update_product(
    State(service): State<SharedService>,
    path: Result<Path<ProductId>, PathRejection>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let Path(id) = path?;
    let Json(draft) = payload?;
    Ok(Json(service.update(id, draft).await?))
}

pub async fn delete_product(
    State(service): State<SharedService>,
    path: Result<Path<ProductId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
