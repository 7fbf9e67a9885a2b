//! The video pipeline: identify a submitted URL, then analyze the video.
//!
//! `identify_video` keeps the stored [`Video`](crate::model::Video) in sync
//! with the platform and links it to the submitting user. `analyze_video`
//! walks the prompt state machine:
//!
//! ```text
//! NO_PROMPT --create--> HAS_PROMPT_NO_RESPONSE --llm ok--> HAS_RESPONSE
//!                                ^        |
//!                                +--fail--+
//! ```
//!
//! Failures leave whatever was already persisted in place; the next call
//! resumes from that state.

mod analyze;
mod identify;
mod locks;

use std::sync::Arc;

use crate::builder::VideoPipelineBuilder;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fetchers::{MetadataSource, TranscriptSource, YouTubeDataApi, YouTubeTranscriptFetcher};
use crate::providers::{LlmProvider, ProviderFactory};
use crate::store::Store;

pub(crate) use locks::KeyedLocks;

pub struct VideoPipeline {
    pub(crate) config: PipelineConfig,
    pub(crate) metadata: Arc<dyn MetadataSource>,
    pub(crate) transcripts: Arc<dyn TranscriptSource>,
    pub(crate) llm: Arc<dyn LlmProvider>,
    pub(crate) store: Arc<dyn Store>,
    /// Serializes identification and analysis per platform video id
    pub(crate) video_locks: KeyedLocks,
}

impl VideoPipeline {
    /// Creates a new builder for wiring a pipeline
    ///
    /// # Example
    /// ```
    /// use yt_optimizer::VideoPipeline;
    ///
    /// let builder = VideoPipeline::builder();
    /// ```
    pub fn builder() -> VideoPipelineBuilder {
        VideoPipelineBuilder::default()
    }

    /// Wire the YouTube and OpenAI adapters described by `config`
    ///
    /// # Errors
    /// Fails when the configuration is invalid or an API key is missing.
    pub fn from_config(config: PipelineConfig, store: Arc<dyn Store>) -> Result<Self> {
        config.validate()?;
        let metadata = YouTubeDataApi::new(&config.youtube, config.timeout())?;
        let transcripts = YouTubeTranscriptFetcher::new(&config.youtube)?;
        let llm = ProviderFactory::create(&config)?;

        Self::builder()
            .metadata(Arc::new(metadata))
            .transcripts(Arc::new(transcripts))
            .llm(llm)
            .store(store)
            .config(config)
            .build()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
