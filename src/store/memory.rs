use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::model::{Prompt, PromptId, User, UserId, Video, VideoId};
use crate::store::{PromptStore, StoreResult, UserStore, VideoStore};

/// Process-local store for tests and the CLI.
///
/// Thread-safe via interior `RwLock`s; designed to be wrapped in `Arc` and
/// shared with the pipeline.
#[derive(Default)]
pub struct MemoryStore {
    videos: RwLock<HashMap<VideoId, Video>>,
    prompts: RwLock<HashMap<PromptId, Prompt>>,
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn video_count(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn prompt_count(&self) -> usize {
        self.prompts.read().await.len()
    }
}

#[async_trait]
impl VideoStore for MemoryStore {
    async fn find_video(&self, id: VideoId) -> StoreResult<Option<Video>> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn find_video_by_yt_id(&self, yt_video_id: &str) -> StoreResult<Option<Video>> {
        Ok(self
            .videos
            .read()
            .await
            .values()
            .find(|video| video.yt_video_id == yt_video_id)
            .cloned())
    }

    async fn insert_video(&self, video: Video) -> StoreResult<Video> {
        let mut videos = self.videos.write().await;
        if videos.values().any(|v| v.yt_video_id == video.yt_video_id) {
            return Err(StoreError::Duplicate {
                kind: "video",
                key: video.yt_video_id,
            });
        }
        videos.insert(video.id, video.clone());
        Ok(video)
    }

    async fn save_video(&self, video: &Video) -> StoreResult<()> {
        let mut videos = self.videos.write().await;
        match videos.get_mut(&video.id) {
            Some(slot) => {
                *slot = video.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                kind: "video",
                id: video.id.to_string(),
            }),
        }
    }
}

#[async_trait]
impl PromptStore for MemoryStore {
    async fn find_prompt(&self, id: PromptId) -> StoreResult<Option<Prompt>> {
        Ok(self.prompts.read().await.get(&id).cloned())
    }

    async fn insert_prompt(&self, prompt: Prompt) -> StoreResult<Prompt> {
        self.prompts.write().await.insert(prompt.id, prompt.clone());
        Ok(prompt)
    }

    async fn save_prompt(&self, prompt: &Prompt) -> StoreResult<()> {
        let mut prompts = self.prompts.write().await;
        match prompts.get_mut(&prompt.id) {
            Some(slot) => {
                *slot = prompt.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                kind: "prompt",
                id: prompt.id.to_string(),
            }),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(StoreError::Duplicate {
                kind: "user",
                key: user.email,
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn add_video(&self, user_id: UserId, video_id: VideoId) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&user_id).ok_or_else(|| StoreError::NotFound {
            kind: "user",
            id: user_id.to_string(),
        })?;
        if user.videos.insert(video_id) {
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VideoDetails;

    fn video(yt_video_id: &str) -> Video {
        Video::new(
            yt_video_id,
            format!("https://youtu.be/{yt_video_id}"),
            VideoDetails {
                title: "T".to_string(),
                description: String::new(),
                tags: Vec::new(),
                published_at: Utc::now(),
                channel_title: "C".to_string(),
                view_count: 0,
                like_count: 0,
                comment_count: 0,
            },
        )
    }

    #[tokio::test]
    async fn test_video_lookup_by_platform_id() {
        let store = MemoryStore::new();
        let inserted = store.insert_video(video("abc123")).await.unwrap();

        let found = store.find_video_by_yt_id("abc123").await.unwrap().unwrap();
        assert_eq!(found.id, inserted.id);
        assert!(store.find_video_by_yt_id("zzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_platform_id_is_rejected() {
        let store = MemoryStore::new();
        store.insert_video(video("abc123")).await.unwrap();

        let result = store.insert_video(video("abc123")).await;
        assert!(matches!(result, Err(StoreError::Duplicate { kind: "video", .. })));
        assert_eq!(store.video_count().await, 1);
    }

    #[tokio::test]
    async fn test_save_unknown_video_fails() {
        let store = MemoryStore::new();
        let result = store.save_video(&video("abc123")).await;
        assert!(matches!(result, Err(StoreError::NotFound { kind: "video", .. })));
    }

    #[tokio::test]
    async fn test_add_video_is_idempotent() {
        let store = MemoryStore::new();
        let user = store.insert_user(User::new("a@example.com")).await.unwrap();
        let video_id = VideoId::new();

        store.add_video(user.id, video_id).await.unwrap();
        store.add_video(user.id, video_id).await.unwrap();

        let user = store.find_user(user.id).await.unwrap().unwrap();
        assert_eq!(user.videos.len(), 1);
        assert!(user.videos.contains(&video_id));
    }

    #[tokio::test]
    async fn test_add_video_to_unknown_user_fails() {
        let store = MemoryStore::new();
        let result = store.add_video(UserId::new(), VideoId::new()).await;
        assert!(matches!(result, Err(StoreError::NotFound { kind: "user", .. })));
    }

    #[tokio::test]
    async fn test_user_email_is_unique_case_insensitively() {
        let store = MemoryStore::new();
        store.insert_user(User::new("a@example.com")).await.unwrap();

        let result = store.insert_user(User::new("A@Example.com")).await;
        assert!(matches!(result, Err(StoreError::Duplicate { kind: "user", .. })));
    }
}
