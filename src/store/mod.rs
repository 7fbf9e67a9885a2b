mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Prompt, PromptId, User, UserId, Video, VideoId};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn find_video(&self, id: VideoId) -> StoreResult<Option<Video>>;

    /// Look a video up by its platform id
    async fn find_video_by_yt_id(&self, yt_video_id: &str) -> StoreResult<Option<Video>>;

    /// Persist a new video; fails with `Duplicate` if the platform id is taken
    async fn insert_video(&self, video: Video) -> StoreResult<Video>;

    /// Overwrite an existing video
    async fn save_video(&self, video: &Video) -> StoreResult<()>;
}

#[async_trait]
pub trait PromptStore: Send + Sync {
    async fn find_prompt(&self, id: PromptId) -> StoreResult<Option<Prompt>>;

    async fn insert_prompt(&self, prompt: Prompt) -> StoreResult<Prompt>;

    /// Overwrite an existing prompt
    async fn save_prompt(&self, prompt: &Prompt) -> StoreResult<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Persist a new user; fails with `Duplicate` if the email is taken
    async fn insert_user(&self, user: User) -> StoreResult<User>;

    /// Add a video to the user's set; adding it twice is a no-op
    async fn add_video(&self, user_id: UserId, video_id: VideoId) -> StoreResult<()>;
}

/// Everything the pipeline persists
pub trait Store: VideoStore + PromptStore + UserStore {}

impl<T: VideoStore + PromptStore + UserStore> Store for T {}
