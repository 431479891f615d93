// src/logging.rs

use crate::cli::LogLevel;
use std::path::Path;

/// 初始化日志系统：始终输出到 stderr，指定了文件时同时写入文件。
/// 日志文件无法打开时只输出到 stderr，不中断启动。
pub fn init(level: LogLevel, log_file: Option<&Path>) {
    let filter = log::LevelFilter::from(level);

    let mut dispatch = fern::Dispatch::new()
        .level(filter)
        // 依赖库的调试日志过于冗长
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{:<5}] [{}:{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut file_error = None;
    if let Some(path) = log_file {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(dir)
        {
            eprintln!("警告: 无法创建日志目录 {:?}: {}", dir, e);
        }
        match fern::log_file(path) {
            Ok(file) => dispatch = dispatch.chain(file),
            Err(e) => file_error = Some((path.to_path_buf(), e)),
        }
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("警告: 日志系统初始化失败: {}", e);
        return;
    }

    if let Some((path, e)) = file_error {
        log::warn!("无法打开日志文件 {:?}: {}，日志仅输出到终端", path, e);
    }
}
