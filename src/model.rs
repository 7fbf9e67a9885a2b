use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

record_id!(
    /// Identifier of a persisted [`Video`]
    VideoId
);
record_id!(
    /// Identifier of a persisted [`Prompt`]
    PromptId
);
record_id!(
    /// Identifier of a persisted [`User`]
    UserId
);

/// Metadata reported by the video platform.
///
/// Compared field by field to detect upstream edits, so every field that
/// matters for prompt generation must live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub channel_title: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
}

/// A video submitted by at least one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    /// Platform-assigned id extracted from the submitted URL
    pub yt_video_id: String,
    pub url: String,
    pub details: VideoDetails,
    /// Formatted transcript, empty until first fetched
    #[serde(default)]
    pub transcript: String,
    pub prompt_id: Option<PromptId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    pub fn new(yt_video_id: impl Into<String>, url: impl Into<String>, details: VideoDetails) -> Self {
        let now = Utc::now();
        Video {
            id: VideoId::new(),
            yt_video_id: yt_video_id.into(),
            url: url.into(),
            details,
            transcript: String::new(),
            prompt_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Structured result parsed from the model's reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptResponse {
    pub titles: Vec<String>,
    pub description: String,
    pub hashtags: Vec<String>,
    pub timestamps: String,
}

/// Prompt text sent to the model plus its accounting metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: PromptId,
    pub video_id: VideoId,
    pub text: String,
    /// Estimated input token count
    pub tokens: u64,
    /// Estimated cost in USD
    pub cost: f64,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Set once, on the first successful model call
    pub response: Option<PromptResponse>,
    /// The source video changed after this prompt was generated
    #[serde(default)]
    pub video_changed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prompt {
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Videos this user has submitted
    #[serde(default)]
    pub videos: BTreeSet<VideoId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: email.into(),
            first_name: None,
            last_name: None,
            videos: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
