// src/extractor/format.rs

use crate::{
    constants,
    models::{ExtractionResult, MediaFormat, MediaInfo},
};

/// 优先选择同时含音视频的 MP4 中分辨率最高的一个，其次是任意 MP4 中分辨率最高的。
/// 没有可用 URL 的格式不参与选择。
pub fn pick_best_mp4(formats: &[MediaFormat]) -> Option<&MediaFormat> {
    let candidates = || {
        formats
            .iter()
            .filter(|f| f.is_mp4() && f.url.as_deref().is_some_and(|u| !u.is_empty()))
    };
    let tallest = |a: &&MediaFormat, b: &&MediaFormat| a.height.unwrap_or(0).cmp(&b.height.unwrap_or(0));

    candidates()
        .filter(|f| f.has_audio_and_video())
        .max_by(tallest)
        .or_else(|| candidates().max_by(tallest))
}

pub fn quality_label(format: Option<&MediaFormat>) -> String {
    match format.and_then(|f| f.height) {
        Some(height) => format!("{}p • MP4", height),
        None => "MP4".to_string(),
    }
}

/// 从解析器元数据中选出直链；找不到可用直链时返回 `None`
pub fn select_media(info: MediaInfo) -> Option<ExtractionResult> {
    let best = pick_best_mp4(&info.formats);
    let direct_url = best
        .and_then(|f| f.url.clone())
        .or_else(|| info.url.clone().filter(|u| !u.is_empty()))?;
    let quality = quality_label(best);

    let title = info
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| constants::DEFAULT_TITLE.to_string());

    Some(ExtractionResult {
        direct_url,
        title,
        thumbnail: info.thumbnail,
        quality,
    })
}
