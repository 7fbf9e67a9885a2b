mod metadata;
mod transcript;

pub use metadata::YouTubeDataApi;
pub use transcript::{
    format_transcript, format_transcript_tag, YouTubeTranscriptFetcher, TRANSCRIPT_NOT_FOUND,
};

use async_trait::async_trait;

use crate::error::Result;
use crate::model::VideoDetails;

/// One timed caption line
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    /// Start of the line, in seconds from the beginning of the video
    pub offset: f64,
    pub text: String,
}

/// Source of video metadata, keyed by platform video id
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch the current details, or `None` when the platform knows no such video
    async fn fetch_details(&self, yt_video_id: &str) -> Result<Option<VideoDetails>>;
}

/// Source of timed transcripts, keyed by platform video id
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(&self, yt_video_id: &str) -> Result<Vec<TranscriptEntry>>;
}
