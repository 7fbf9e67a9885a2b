use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::fetchers::{MetadataSource, TranscriptSource};
use crate::pipelines::{KeyedLocks, VideoPipeline};
use crate::providers::LlmProvider;
use crate::store::Store;

/// Builder for wiring a [`VideoPipeline`] from explicit collaborators
#[derive(Default)]
pub struct VideoPipelineBuilder {
    config: Option<PipelineConfig>,
    metadata: Option<Arc<dyn MetadataSource>>,
    transcripts: Option<Arc<dyn TranscriptSource>>,
    llm: Option<Arc<dyn LlmProvider>>,
    store: Option<Arc<dyn Store>>,
}

impl VideoPipelineBuilder {
    /// Set the pipeline configuration
    ///
    /// Defaults to [`PipelineConfig::default`] when not set.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the source of video metadata
    pub fn metadata(mut self, metadata: Arc<dyn MetadataSource>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the source of video transcripts
    pub fn transcripts(mut self, transcripts: Arc<dyn TranscriptSource>) -> Self {
        self.transcripts = Some(transcripts);
        self
    }

    /// Set the chat-completion provider
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use yt_optimizer::{OpenAIProvider, VideoPipeline};
    ///
    /// let builder = VideoPipeline::builder().llm(Arc::new(OpenAIProvider::with_base_url(
    ///     "your-api-key".to_string(),
    ///     "https://api.openai.com".to_string(),
    /// )));
    /// ```
    pub fn llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Set the persistence backend
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use yt_optimizer::{MemoryStore, VideoPipeline};
    ///
    /// let builder = VideoPipeline::builder().store(Arc::new(MemoryStore::new()));
    /// ```
    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Validate the configuration and assemble the pipeline
    ///
    /// # Errors
    /// Returns `PipelineError` if:
    /// - A collaborator was not set
    /// - The configuration fails validation
    pub fn build(self) -> Result<VideoPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(VideoPipeline {
            config,
            metadata: self.metadata.ok_or_else(|| missing("metadata"))?,
            transcripts: self.transcripts.ok_or_else(|| missing("transcripts"))?,
            llm: self.llm.ok_or_else(|| missing("llm"))?,
            store: self.store.ok_or_else(|| missing("store"))?,
            video_locks: KeyedLocks::new(),
        })
    }
}

fn missing(collaborator: &str) -> PipelineError {
    PipelineError::BuilderError(format!(
        "No {collaborator} collaborator specified. Use .{collaborator}()"
    ))
}
