// src/server/mod.rs

mod handlers;
mod response;

use crate::{error::*, resolver::RequestCoordinator};
use axum::{
    Router,
    routing::{get, post},
};
use log::{info, warn};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: RequestCoordinator,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/fetch", post(handlers::fetch))
        .route("/download", post(handlers::download))
        .route("/api/info", get(handlers::info))
        .route("/stats", get(handlers::stats))
        .with_state(state)
}

/// 在已绑定的监听器上运行服务，直到收到 Ctrl+C
pub async fn serve(listener: TcpListener, state: AppState) -> AppResult<()> {
    let addr = listener.local_addr()?;
    info!("服务已启动: http://{}", addr);

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听 Ctrl+C 信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到中断信号，正在关闭服务...");
}
