// src/cli.rs

use crate::constants;
use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
)]
pub struct Cli {
    // --- 服务 (Server) ---
    /// 监听地址
    #[arg(long, default_value = constants::DEFAULT_HOST, help_heading = "Server")]
    pub host: String,
    /// 监听端口
    #[arg(short, long, env = "PORT", default_value_t = constants::DEFAULT_PORT, help_heading = "Server")]
    pub port: u16,
    /// 指定 JSON 配置文件 (默认读取 ~/.vid-relay/config.json)
    #[arg(short, long, value_name = "FILE", help_heading = "Server")]
    pub config: Option<PathBuf>,

    // --- 解析选项 (Options) ---
    /// 单次解析的最长等待时间 (秒)
    #[arg(long, value_name = "SECS", help_heading = "Options")]
    pub extract_timeout: Option<u64>,
    /// 解析结果缓存的最大条目数
    #[arg(long, value_name = "N", help_heading = "Options")]
    pub cache_capacity: Option<usize>,
    /// 解析结果缓存的有效期 (秒)
    #[arg(long, value_name = "SECS", help_heading = "Options")]
    pub cache_ttl: Option<u64>,
    /// yt-dlp 可执行文件路径
    #[arg(long, value_name = "PATH", help_heading = "Options")]
    pub ytdlp_path: Option<String>,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// 日志输出级别
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true, help_heading = "General")]
    pub log_level: LogLevel,
    /// 同时将日志写入该文件
    #[arg(long, value_name = "FILE", global = true, help_heading = "General")]
    pub log_file: Option<PathBuf>,
}
