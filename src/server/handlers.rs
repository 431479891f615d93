// src/server/handlers.rs

use super::AppState;
use crate::{
    constants,
    error::*,
    models::{FetchResponse, MediaInfoResponse, UrlRequest},
    stats::StatsSnapshot,
};
use axum::{
    Json,
    body::Body,
    extract::{
        ConnectInfo, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use log::debug;
use std::net::SocketAddr;

/// 请求体无法解析时按缺少 url 处理
fn requested_url(payload: Result<Json<UrlRequest>, JsonRejection>) -> AppResult<String> {
    match payload {
        Ok(Json(UrlRequest { url: Some(url) })) if !url.trim().is_empty() => Ok(url),
        Ok(_) => Err(AppError::InvalidInput),
        Err(rejection) => {
            debug!("请求体无效: {}", rejection);
            Err(AppError::InvalidInput)
        }
    }
}

pub async fn fetch(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> AppResult<Json<FetchResponse>> {
    let url = requested_url(payload)?;
    let response = state.coordinator.fetch_metadata(&url, Some(addr.ip())).await?;
    Ok(Json(response))
}

pub async fn download(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> AppResult<Response> {
    let url = requested_url(payload)?;
    let media = state.coordinator.download_bytes(&url, Some(addr.ip())).await?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", media.filename))
        .map_err(|e| AppError::Other(anyhow::anyhow!("无效的文件名头: {}", e)))?;

    let mut response = Body::from_stream(media.body).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(constants::MEDIA_CONTENT_TYPE),
    );
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    if let Some(len) = media.content_length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }
    Ok(response)
}

pub async fn info(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    query: Result<Query<UrlRequest>, QueryRejection>,
) -> AppResult<Json<MediaInfoResponse>> {
    let url = match query {
        Ok(Query(UrlRequest { url: Some(url) })) => url,
        _ => return Err(AppError::InvalidInput),
    };
    let response = state.coordinator.media_info(&url, Some(addr.ip())).await?;
    Ok(Json(response))
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.coordinator.stats().snapshot())
}
