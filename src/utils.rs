// src/utils.rs

use crate::constants;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// 去掉字母、数字、空白以外的字符，合并连续空白，截断到固定长度，
/// 截断处若落在空格上则去掉末尾空白。
/// 结果只含 ASCII，可以直接放进 Content-Disposition 头。
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let collapsed = WHITESPACE_RE.replace_all(&kept, " ");
    let truncated: String = collapsed
        .trim()
        .chars()
        .take(constants::FILENAME_TITLE_MAX_CHARS)
        .collect();
    truncated.trim_end().to_string()
}

/// 由视频标题生成下载文件名，例如 `Amazing Video 1 HD_vidrelay.mp4`
pub fn build_download_filename(title: &str) -> String {
    let base = sanitize_title(title);
    let base = if base.is_empty() {
        constants::FILENAME_FALLBACK_BASE
    } else {
        base.as_str()
    };
    format!(
        "{}{}.{}",
        base,
        constants::FILENAME_SUFFIX,
        constants::FILENAME_EXTENSION
    )
}

/// 日志中截断过长的链接
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", head)
}
