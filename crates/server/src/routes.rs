use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    normalize_path::NormalizePath,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{debug, Level};

use common::types::{Health, MessageBody};
use service::items::ItemStore;

use crate::messages;

pub mod items;

/// Application service: the router behind trailing-slash normalisation, so
/// `/items/` and `/items/<id>/` route like their slash-less forms.
pub type App = NormalizePath<Router>;

/// Shared handler state: the process-wide item store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ItemStore>,
}

impl AppState {
    pub fn new(store: Arc<ItemStore>) -> Self {
        Self { store }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Catch-all for any path or method no route answers.
pub async fn fallback() -> (StatusCode, Json<MessageBody>) {
    debug!("unmatched route");
    (StatusCode::NOT_FOUND, Json(MessageBody::new(messages::ROUTE_NOT_FOUND)))
}

/// Item CRUD routes, relative to the mount prefix.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items).fallback(fallback))
        // creation lives on its own path, not on POST /
        .route(
            "/createItems",
            post(items::create_item)
                .get(items::get_create_segment)
                .put(items::update_create_segment)
                .delete(items::delete_create_segment)
                .fallback(fallback),
        )
        .route(
            "/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item)
                .fallback(fallback),
        )
}

/// Build the full application router: item routes under `prefix`, health probe, and fallback.
///
/// `prefix` must start with `/` and must not be `/` itself.
pub fn build_router(state: AppState, prefix: &str, cors: CorsLayer) -> App {
    let router: Router = Router::new()
        .route("/health", get(health))
        .nest(prefix, item_routes())
        .fallback(fallback)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        );
    // 路由匹配之前去掉末尾斜杠，因此必须包在 Router 外层
    NormalizePath::trim_trailing_slash(router)
}
