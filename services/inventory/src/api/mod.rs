//! HTTP 接口层

mod handlers;
mod routes;

pub use handlers::{DescriptionQuery, SharedService};
pub use routes::routes;
