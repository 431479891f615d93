// src/models/api.rs

use serde::Deserialize;

// --- yt-dlp `--dump-single-json` 输出结构体 ---
// 只声明用到的字段，其余字段由 serde 忽略

#[derive(Deserialize, Debug, Clone, Default)]
pub struct YtDlpInfo {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    /// 使用 `-f` 选定单一格式时 yt-dlp 会给出顶层直链
    pub url: Option<String>,
    #[serde(default)]
    pub formats: Vec<YtDlpFormat>,
    /// 播放列表类结果
    pub entries: Option<Vec<YtDlpInfo>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct YtDlpFormat {
    #[serde(default)]
    pub format_id: String,
    #[serde(default)]
    pub ext: String,
    pub url: Option<String>,
    pub height: Option<u32>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
}
