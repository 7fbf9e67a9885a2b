//! Generates SEO titles, a description, hashtags and chapter timestamps for
//! YouTube videos.
//!
//! ```no_run
//! use std::sync::Arc;
//! use yt_optimizer::{MemoryStore, PipelineConfig, User, UserStore, VideoPipeline};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let user = store.insert_user(User::new("me@example.com")).await?;
//! let pipeline = VideoPipeline::from_config(PipelineConfig::load()?, store)?;
//!
//! let video = pipeline
//!     .identify_video("https://youtu.be/dQw4w9WgXcQ", user.id)
//!     .await?;
//! let response = pipeline.analyze_video(&video.id.to_string()).await?;
//! println!("{}", response.timestamps);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod cost;
pub mod error;
pub mod fetchers;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod response;
pub mod store;
pub mod video_id;

pub use builder::VideoPipelineBuilder;
pub use config::{LlmConfig, ModelPricing, PipelineConfig, YouTubeConfig};
pub use error::{ErrorPayload, PipelineError, Result, StoreError};
pub use fetchers::{
    MetadataSource, TranscriptEntry, TranscriptSource, YouTubeDataApi, YouTubeTranscriptFetcher,
};
pub use model::{Prompt, PromptId, PromptResponse, User, UserId, Video, VideoDetails, VideoId};
pub use pipelines::VideoPipeline;
pub use providers::{CompletionRequest, LlmProvider, OpenAIProvider, ProviderFactory};
pub use store::{MemoryStore, PromptStore, Store, UserStore, VideoStore};
pub use video_id::extract_video_id;
