// src/main.rs

use clap::Parser;
use colored::*;
use std::sync::Arc;
use vid_relay::{cli::Cli, logging, run_from_cli, symbols};

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持。
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }

    let args = Arc::new(Cli::parse());
    logging::init(args.log_level, args.log_file.as_deref());

    if let Err(e) = run_from_cli(args).await {
        log::error!("服务异常退出: {}", e);
        eprintln!(
            "\n{} {}",
            *symbols::ERROR,
            format!("程序执行出错: {}", e).red()
        );
        std::process::exit(1);
    }
}
