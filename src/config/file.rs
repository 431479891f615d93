// src/config/file.rs

use crate::{
    config::ExternalConfig,
    constants,
    error::{AppError, AppResult},
};
use anyhow::Context;
use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub(super) fn get_default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME)
    })
}

/// 加载外部配置文件。
/// 显式指定的文件必须存在；默认位置的文件不存在时使用内置默认值。
pub(crate) fn load_external_config(explicit: Option<&Path>) -> AppResult<ExternalConfig> {
    let config_path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "配置文件 '{}' 不存在",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match get_default_config_path() {
            Some(path) if path.is_file() => path,
            _ => {
                debug!("未找到默认配置文件，使用内置默认配置");
                return Ok(ExternalConfig::default());
            }
        },
    };

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("读取配置文件 '{}' 失败", config_path.display()))?;
    let config: ExternalConfig = serde_json::from_str(&content)
        .with_context(|| format!("解析配置文件 '{}' 失败", config_path.display()))?;
    info!("已加载配置文件: {}", config_path.display());
    Ok(config)
}
