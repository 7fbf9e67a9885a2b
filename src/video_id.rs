use regex::Regex;
use std::sync::LazyLock;

/// Supported YouTube URL shapes, tried in order. Each captures the video id.
static VIDEO_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // youtube.com/watch?v=VIDEO_ID (also www. and m.)
        r"(?:https?://)?(?:www\.|m\.)?youtube\.com/watch\?(?:[^&#]*&)*v=([\w-]+)",
        // youtu.be/VIDEO_ID
        r"(?:https?://)?youtu\.be/([\w-]+)",
        // youtube.com/embed/VIDEO_ID
        r"(?:https?://)?(?:www\.)?youtube\.com/embed/([\w-]+)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Extract the platform video id from a watch-page, short-link or embed URL
///
/// Returns `None` for anything that does not match a supported form.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    VIDEO_URL_PATTERNS.iter().find_map(|re| {
        re.captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Canonical watch-page URL for a video id
pub fn canonical_url(yt_video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={yt_video_id}")
}
