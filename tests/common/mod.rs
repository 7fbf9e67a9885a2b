#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use yt_optimizer::{
    CompletionRequest, LlmProvider, MemoryStore, MetadataSource, PipelineError, Result,
    TranscriptEntry, TranscriptSource, User, UserId, UserStore, VideoDetails, VideoPipeline,
};

pub const VALID_REPLY: &str = r##"{
    "titles": ["One", "Two", "Three", "Four", "Five"],
    "description": "Everything about the video.",
    "hashtags": ["#rust", "#tokio"],
    "timestamps": "0:00 Intro\n5:30 Setup"
}"##;

pub fn details(title: &str) -> VideoDetails {
    VideoDetails {
        title: title.to_string(),
        description: "Learn async Rust".to_string(),
        tags: vec!["rust".to_string(), "async".to_string()],
        published_at: "2024-03-01T12:00:00Z".parse().unwrap(),
        channel_title: "Rust Channel".to_string(),
        view_count: 1200,
        like_count: 80,
        comment_count: 7,
    }
}

/// Metadata source answering with whatever `details` currently holds
pub struct FakeMetadata {
    pub details: Mutex<Option<VideoDetails>>,
    pub calls: AtomicUsize,
}

impl FakeMetadata {
    pub fn new(details: Option<VideoDetails>) -> Arc<Self> {
        Arc::new(Self {
            details: Mutex::new(details),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set(&self, details: Option<VideoDetails>) {
        *self.details.lock().unwrap() = details;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataSource for FakeMetadata {
    async fn fetch_details(&self, _yt_video_id: &str) -> Result<Option<VideoDetails>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.details.lock().unwrap().clone())
    }
}

/// Transcript source that fails while `entries` is `None`
///
/// After `hold()`, each fetch signals `entered` and then waits for `release`.
pub struct FakeTranscripts {
    pub entries: Mutex<Option<Vec<TranscriptEntry>>>,
    pub calls: AtomicUsize,
    pub held: AtomicBool,
    pub entered: Notify,
    pub release: Notify,
}

impl FakeTranscripts {
    pub fn new(entries: Option<Vec<TranscriptEntry>>) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(entries),
            calls: AtomicUsize::new(0),
            held: AtomicBool::new(false),
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    pub fn set(&self, entries: Option<Vec<TranscriptEntry>>) {
        *self.entries.lock().unwrap() = entries;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch_transcript(&self, yt_video_id: &str) -> Result<Vec<TranscriptEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.held.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.entries
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| PipelineError::Transcript {
                yt_video_id: yt_video_id.to_string(),
                reason: "captions disabled".to_string(),
            })
    }
}

pub fn entries() -> Vec<TranscriptEntry> {
    vec![
        TranscriptEntry {
            offset: 0.0,
            text: "Welcome back".to_string(),
        },
        TranscriptEntry {
            offset: 330.4,
            text: "Let&#39;s set up tokio".to_string(),
        },
    ]
}

/// LLM returning queued replies, then `VALID_REPLY` once the queue is empty
pub struct FakeLlm {
    pub replies: Mutex<VecDeque<String>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
    pub delay: Duration,
}

impl FakeLlm {
    pub fn new() -> Arc<Self> {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay,
        })
    }

    pub fn queue(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(reply.to_string());
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let reply = self.replies.lock().unwrap().pop_front();
        Ok(reply.unwrap_or_else(|| VALID_REPLY.to_string()))
    }
}

pub struct Harness {
    pub pipeline: Arc<VideoPipeline>,
    pub store: Arc<MemoryStore>,
    pub metadata: Arc<FakeMetadata>,
    pub transcripts: Arc<FakeTranscripts>,
    pub llm: Arc<FakeLlm>,
    pub user_id: UserId,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_llm(FakeLlm::new()).await
    }

    pub async fn with_llm(llm: Arc<FakeLlm>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let metadata = FakeMetadata::new(Some(details("Async Rust")));
        let transcripts = FakeTranscripts::new(Some(entries()));
        let user = store
            .insert_user(User::new("viewer@example.com"))
            .await
            .unwrap();

        let pipeline = VideoPipeline::builder()
            .metadata(metadata.clone())
            .transcripts(transcripts.clone())
            .llm(llm.clone())
            .store(store.clone())
            .build()
            .unwrap();

        Harness {
            pipeline: Arc::new(pipeline),
            store,
            metadata,
            transcripts,
            llm,
            user_id: user.id,
        }
    }
}
