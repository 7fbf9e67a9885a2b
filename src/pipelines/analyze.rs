use log::{debug, info, warn};

use crate::cost::{estimate_cost, estimate_token_count};
use crate::error::{PipelineError, Result};
use crate::fetchers::{format_transcript, TRANSCRIPT_NOT_FOUND};
use crate::model::{Prompt, PromptId, PromptResponse, Video, VideoId};
use crate::pipelines::VideoPipeline;
use crate::providers::{render_prompt, CompletionRequest};
use crate::response::parse_response;

impl VideoPipeline {
    /// Produce the optimization response for a stored video
    ///
    /// The response is generated once per prompt and served from the prompt
    /// afterwards. A failed model call or an unparseable reply leaves the
    /// prompt without a response, and the next call retries with the same
    /// prompt.
    ///
    /// # Errors
    /// - `InvalidVideoId` / `UnknownVideo` for a bad or unknown record id
    /// - provider and `MalformedResponse` errors from the model call
    pub async fn analyze_video(&self, video_id: &str) -> Result<PromptResponse> {
        let video_id: VideoId = video_id
            .parse()
            .map_err(|_| PipelineError::InvalidVideoId(video_id.to_string()))?;

        let yt_video_id = self
            .store
            .find_video(video_id)
            .await?
            .ok_or(PipelineError::UnknownVideo(video_id))?
            .yt_video_id;

        // Same lock as identification, so a detail refresh cannot interleave
        let _guard = self.video_locks.lock(&yt_video_id).await;
        let mut video = self
            .store
            .find_video(video_id)
            .await?
            .ok_or(PipelineError::UnknownVideo(video_id))?;

        let mut prompt = match video.prompt_id {
            Some(prompt_id) => self.load_prompt(prompt_id).await?,
            None => self.create_prompt(&mut video).await?,
        };

        if let Some(response) = &prompt.response {
            debug!("Serving cached response for video {}", video.id);
            return Ok(response.clone());
        }

        let request = CompletionRequest::for_prompt(
            &prompt.model_name,
            prompt.temperature,
            prompt.max_tokens,
            &prompt.text,
        );
        info!(
            "Requesting completion from {} for prompt {}",
            self.llm.provider_name(),
            prompt.id
        );
        let raw = self.llm.complete(&request).await?;
        let response = parse_response(&raw)?;

        prompt.response = Some(response.clone());
        prompt.touch();
        self.store.save_prompt(&prompt).await?;
        info!("Stored response for prompt {}", prompt.id);

        Ok(response)
    }

    async fn load_prompt(&self, prompt_id: PromptId) -> Result<Prompt> {
        self.store
            .find_prompt(prompt_id)
            .await?
            .ok_or(PipelineError::PromptMissing(prompt_id))
    }

    /// Render, price and persist a new prompt, then link it to `video`
    async fn create_prompt(&self, video: &mut Video) -> Result<Prompt> {
        let transcript = self.resolve_transcript(video).await?;
        let text = render_prompt(&video.details, &transcript);

        let llm = &self.config.llm;
        let tokens = estimate_token_count(&text);
        let cost = estimate_cost(
            tokens,
            u64::from(llm.max_tokens),
            &llm.model,
            &self.config.pricing,
        )?;

        let now = chrono::Utc::now();
        let prompt = self
            .store
            .insert_prompt(Prompt {
                id: PromptId::new(),
                video_id: video.id,
                text,
                tokens,
                cost,
                model_name: llm.model.clone(),
                temperature: llm.temperature,
                max_tokens: llm.max_tokens,
                response: None,
                video_changed: false,
                created_at: now,
                updated_at: now,
            })
            .await?;

        video.prompt_id = Some(prompt.id);
        video.touch();
        self.store.save_video(video).await?;
        info!(
            "Created prompt {} for video {} ({} tokens, ${:.4})",
            prompt.id, video.id, tokens, cost
        );

        Ok(prompt)
    }

    /// Cached transcript, or a fresh one stored on `video`
    ///
    /// Source failures and empty transcripts fall back to the placeholder,
    /// which is never cached.
    async fn resolve_transcript(&self, video: &mut Video) -> Result<String> {
        if !video.transcript.is_empty() {
            debug!("Using cached transcript for video {}", video.id);
            return Ok(video.transcript.clone());
        }

        let entries = match self.transcripts.fetch_transcript(&video.yt_video_id).await {
            Ok(entries) if !entries.is_empty() => entries,
            Ok(_) => {
                warn!("Empty transcript for {}", video.yt_video_id);
                return Ok(TRANSCRIPT_NOT_FOUND.to_string());
            }
            Err(e) => {
                warn!("Transcript fetch failed for {}: {}", video.yt_video_id, e);
                return Ok(TRANSCRIPT_NOT_FOUND.to_string());
            }
        };

        video.transcript = format_transcript(&entries);
        video.touch();
        self.store.save_video(video).await?;
        debug!(
            "Cached {} transcript lines for video {}",
            entries.len(),
            video.id
        );

        Ok(video.transcript.clone())
    }
}
