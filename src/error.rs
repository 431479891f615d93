// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("缺少视频链接 (url 为空)")]
    InvalidInput,
    #[error("解析超时 (目标站点可能拦截或服务器超时)")]
    Timeout,
    #[error("未找到可下载的视频")]
    NoMediaFound,
    #[error("视频解析失败: {0}")]
    ExtractionFailed(String),
    #[error("获取视频文件失败: {0}")]
    UpstreamFetchFailed(String),
    #[error("解析任务已取消")]
    Cancelled,
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("网络中间件错误: {0}")]
    NetworkMiddleware(#[from] reqwest_middleware::Error),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("配置错误: {0}")]
    Config(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// 返回给客户端的机器可读错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput => "invalid_input",
            AppError::Timeout => "timeout",
            AppError::NoMediaFound => "no_media",
            AppError::ExtractionFailed(_) | AppError::Cancelled => "extraction_failed",
            AppError::UpstreamFetchFailed(_) | AppError::NetworkMiddleware(_) => {
                "upstream_fetch_failed"
            }
            _ => "internal",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
