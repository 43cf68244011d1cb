//! QR Code API 模块
//!
//! 桌台二维码令牌的签发、重发、停用与查询。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/qrcodes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::issue))
        .route("/regenerate", post(handler::regenerate))
        .route("/{id}/deactivate", post(handler::deactivate))
}
