//! 路由定义

use axum::Router;
use axum::routing::get;

use super::handlers::{
    SharedService, create_product, delete_product, get_product, list_products, search_products,
    update_product,
};

/// 产品路由，挂载在 `/products` 下
///
/// `/products/description` 是静态段，axum 会优先于 `/products/{id}` 匹配
pub fn routes(service: SharedService) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/description", get(search_products))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(service)
}
