use serde::Serialize;
use thiserror::Error;

use crate::model::{PromptId, UserId, VideoId};

/// Errors raised by persistence collaborators
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced record does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A record with the same natural key already exists
    #[error("{kind} with key {key} already exists")]
    Duplicate { kind: &'static str, key: String },

    /// Backend-specific failure (connection, serialization, ...)
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors that can occur while identifying or analyzing a video
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The submitted URL does not contain a recognizable YouTube video id
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    /// The submitted video record id could not be parsed
    #[error("Invalid video id: {0}")]
    InvalidVideoId(String),

    /// The video platform returned no metadata for this id
    #[error("Video not found: {yt_video_id}")]
    VideoNotFound { yt_video_id: String },

    /// No video record exists with this id
    #[error("Unknown video {0}")]
    UnknownVideo(VideoId),

    /// No user record exists with this id
    #[error("Unknown user {0}")]
    UnknownUser(UserId),

    /// A video points at a prompt record that no longer exists
    #[error("Prompt {0} referenced by video is missing")]
    PromptMissing(PromptId),

    /// HTTP transport failure talking to an external API
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The video platform API answered with an error status
    #[error("{service} API returned {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The transcript source could not produce a transcript
    #[error("Transcript unavailable for {yt_video_id}: {reason}")]
    Transcript { yt_video_id: String, reason: String },

    /// The LLM provider answered with a non-success status
    #[error("Provider {provider} returned {status}: {body}")]
    Provider {
        provider: String,
        status: u16,
        body: String,
    },

    /// The LLM provider answered without any completion content
    #[error("Provider {provider} returned no completion content")]
    EmptyCompletion { provider: String },

    /// The model output is not the expected JSON object
    #[error("Malformed model output: {source}")]
    MalformedResponse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// No price is configured for the model
    #[error("No pricing configured for model '{0}'")]
    UnknownModelPricing(String),

    /// An API key is neither in the configuration nor in the environment
    #[error("Missing API key: set {env_var} or the matching config entry")]
    MissingApiKey { env_var: &'static str },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Configuration was loaded but is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pipeline builder was not given every collaborator
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Persistence collaborator failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

impl PipelineError {
    /// HTTP status a routing layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::InvalidUrl(_) | PipelineError::InvalidVideoId(_) => 400,
            PipelineError::VideoNotFound { .. }
            | PipelineError::UnknownVideo(_)
            | PipelineError::UnknownUser(_) => 404,
            PipelineError::Http(_)
            | PipelineError::Api { .. }
            | PipelineError::Transcript { .. }
            | PipelineError::Provider { .. }
            | PipelineError::EmptyCompletion { .. }
            | PipelineError::MalformedResponse { .. } => 502,
            PipelineError::PromptMissing(_)
            | PipelineError::UnknownModelPricing(_)
            | PipelineError::MissingApiKey { .. }
            | PipelineError::ConfigError(_)
            | PipelineError::InvalidConfig(_)
            | PipelineError::BuilderError(_)
            | PipelineError::Store(_) => 500,
        }
    }
}

/// `{"error": "..."}` body handed back to the routing layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl From<&PipelineError> for ErrorPayload {
    fn from(err: &PipelineError) -> Self {
        // Internal failures are not described to clients.
        let error = if err.status_code() == 500 {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        ErrorPayload { error }
    }
}
