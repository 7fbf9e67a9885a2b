use async_trait::async_trait;
use log::debug;
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::config::YouTubeConfig;
use crate::error::{PipelineError, Result};
use crate::fetchers::{TranscriptEntry, TranscriptSource};

/// Stand-in transcript used for prompt rendering when none can be fetched
pub const TRANSCRIPT_NOT_FOUND: &str = "Transcript not found";

/// Caption fetcher backed by the public YouTube transcript endpoints
pub struct YouTubeTranscriptFetcher {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YouTubeTranscriptFetcher {
    pub fn new(config: &YouTubeConfig) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            PipelineError::InvalidConfig(format!("failed to initialize transcript client: {e}"))
        })?;

        Ok(Self {
            api,
            languages: config.languages.clone(),
        })
    }
}

#[async_trait]
impl TranscriptSource for YouTubeTranscriptFetcher {
    async fn fetch_transcript(&self, yt_video_id: &str) -> Result<Vec<TranscriptEntry>> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(yt_video_id, &languages, false)
            .await
            .map_err(|e| PipelineError::Transcript {
                yt_video_id: yt_video_id.to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            "Fetched {} transcript snippet(s) for {}",
            transcript.snippets.len(),
            yt_video_id
        );

        Ok(transcript
            .snippets
            .into_iter()
            .map(|snippet| TranscriptEntry {
                offset: snippet.start,
                text: snippet.text,
            })
            .collect())
    }
}

/// Format an offset as `M:SS`, or `H:MM:SS` from one hour on
///
/// Fractional seconds are dropped.
pub fn format_transcript_tag(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Render entries as `"<tag> - <text>"` lines joined by newlines
///
/// Caption text is only HTML-entity decoded, never trimmed.
pub fn format_transcript(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} - {}",
                format_transcript_tag(entry.offset),
                html_escape::decode_html_entities(&entry.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
