use log::{debug, info};

use crate::error::{PipelineError, Result, StoreError};
use crate::model::{UserId, Video};
use crate::pipelines::VideoPipeline;
use crate::video_id::{canonical_url, extract_video_id};

impl VideoPipeline {
    /// Resolve a submitted URL to a stored video and link it to the user
    ///
    /// New videos are created from the platform metadata. Known videos are
    /// refreshed: if any detail changed, the current prompt is marked stale
    /// and unlinked so the next analysis regenerates it.
    ///
    /// # Errors
    /// - `InvalidUrl` when no video id can be extracted (nothing is fetched)
    /// - `UnknownUser` when `user_id` has no record
    /// - `VideoNotFound` when the platform has no such video
    pub async fn identify_video(&self, url: &str, user_id: UserId) -> Result<Video> {
        let yt_video_id =
            extract_video_id(url).ok_or_else(|| PipelineError::InvalidUrl(url.to_string()))?;

        if self.store.find_user(user_id).await?.is_none() {
            return Err(PipelineError::UnknownUser(user_id));
        }

        let video = {
            let _guard = self.video_locks.lock(&yt_video_id).await;
            match self.store.find_video_by_yt_id(&yt_video_id).await? {
                Some(video) => self.refresh_video(video).await?,
                None => self.create_video(&yt_video_id).await?,
            }
        };

        self.store
            .add_video(user_id, video.id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { kind: "user", .. } => PipelineError::UnknownUser(user_id),
                other => other.into(),
            })?;

        Ok(video)
    }

    async fn create_video(&self, yt_video_id: &str) -> Result<Video> {
        let details = self
            .metadata
            .fetch_details(yt_video_id)
            .await?
            .ok_or_else(|| PipelineError::VideoNotFound {
                yt_video_id: yt_video_id.to_string(),
            })?;

        let video = self
            .store
            .insert_video(Video::new(yt_video_id, canonical_url(yt_video_id), details))
            .await?;
        info!("Created video {} for {}", video.id, yt_video_id);
        Ok(video)
    }

    async fn refresh_video(&self, mut video: Video) -> Result<Video> {
        let details = self
            .metadata
            .fetch_details(&video.yt_video_id)
            .await?
            .ok_or_else(|| PipelineError::VideoNotFound {
                yt_video_id: video.yt_video_id.clone(),
            })?;

        if details == video.details {
            debug!("Video {} unchanged upstream", video.id);
            return Ok(video);
        }

        info!("Video {} changed upstream, invalidating prompt", video.id);
        if let Some(prompt_id) = video.prompt_id.take() {
            if let Some(mut prompt) = self.store.find_prompt(prompt_id).await? {
                prompt.video_changed = true;
                prompt.touch();
                self.store.save_prompt(&prompt).await?;
            }
        }
        video.details = details;
        video.touch();
        self.store.save_video(&video).await?;

        Ok(video)
    }
}
