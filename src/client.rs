// src/client.rs

use crate::{config::AppConfig, error::*};
use reqwest::{IntoUrl, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

#[derive(Clone)]
pub struct RobustClient {
    pub client: ClientWithMiddleware,
}

impl RobustClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        // 只限制连接与单次读取的时间，视频文件整体传输可能很久
        let inner = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()?;
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client })
    }

    /// 发起 GET 请求。连接失败与非 2xx 状态码都视为上游获取失败
    pub async fn get<T: IntoUrl>(&self, url: T) -> AppResult<Response> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::UpstreamFetchFailed(format!(
                "上游返回状态码 {}",
                status
            )));
        }
        Ok(res)
    }
}
