use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::YouTubeConfig;
use crate::error::{PipelineError, Result};
use crate::fetchers::MetadataSource;
use crate::model::VideoDetails;

const SERVICE: &str = "youtube";

/// YouTube Data API v3 client for `videos.list` (snippet + statistics)
pub struct YouTubeDataApi {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    published_at: DateTime<Utc>,
    channel_title: String,
}

/// Counters are sent as decimal strings and omitted when hidden by the owner
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

impl YouTubeDataApi {
    /// Create a client from configuration
    pub fn new(config: &YouTubeConfig, timeout: Duration) -> Result<Self> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("YOUTUBE_API_KEY").ok())
            .ok_or(PipelineError::MissingApiKey {
                env_var: "YOUTUBE_API_KEY",
            })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("yt-optimizer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(YouTubeDataApi {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        YouTubeDataApi {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

fn parse_count(field: &str, value: Option<String>) -> Result<u64> {
    match value {
        None => Ok(0),
        Some(raw) => raw.trim().parse().map_err(|_| PipelineError::Api {
            service: SERVICE,
            status: 200,
            body: format!("invalid {field}: {raw:?}"),
        }),
    }
}

impl VideoItem {
    fn into_details(self) -> Result<VideoDetails> {
        Ok(VideoDetails {
            title: self.snippet.title,
            description: self.snippet.description,
            tags: self.snippet.tags,
            published_at: self.snippet.published_at,
            channel_title: self.snippet.channel_title,
            view_count: parse_count("viewCount", self.statistics.view_count)?,
            like_count: parse_count("likeCount", self.statistics.like_count)?,
            comment_count: parse_count("commentCount", self.statistics.comment_count)?,
        })
    }
}

#[async_trait]
impl MetadataSource for YouTubeDataApi {
    async fn fetch_details(&self, yt_video_id: &str) -> Result<Option<VideoDetails>> {
        let response = self
            .client
            .get(format!("{}/youtube/v3/videos", self.base_url))
            .query(&[
                ("part", "snippet,statistics"),
                ("id", yt_video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Api {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let list: VideoListResponse = response.json().await?;
        debug!("videos.list returned {} item(s) for {}", list.items.len(), yt_video_id);

        match list.items.into_iter().next() {
            Some(item) => item.into_details().map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const VIDEO_JSON: &str = r#"{
        "kind": "youtube#videoListResponse",
        "items": [{
            "id": "abc123",
            "snippet": {
                "publishedAt": "2024-03-01T12:30:00Z",
                "channelId": "UC1",
                "title": "Building a Rust CLI",
                "description": "From zero to release",
                "channelTitle": "Rustacean Station",
                "tags": ["rust", "cli"]
            },
            "statistics": {
                "viewCount": "15234",
                "likeCount": "812",
                "favoriteCount": "0",
                "commentCount": "97"
            }
        }]
    }"#;

    #[tokio::test]
    async fn test_fetch_details() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/youtube/v3/videos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("part".into(), "snippet,statistics".into()),
                Matcher::UrlEncoded("id".into(), "abc123".into()),
                Matcher::UrlEncoded("key".into(), "fake_key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(VIDEO_JSON)
            .create();

        let api = YouTubeDataApi::with_base_url("fake_key".to_string(), server.url());
        let details = api.fetch_details("abc123").await.unwrap().unwrap();

        assert_eq!(details.title, "Building a Rust CLI");
        assert_eq!(details.channel_title, "Rustacean Station");
        assert_eq!(details.tags, vec!["rust", "cli"]);
        assert_eq!(details.view_count, 15234);
        assert_eq!(details.like_count, 812);
        assert_eq!(details.comment_count, 97);
        assert_eq!(
            details.published_at,
            "2024-03-01T12:30:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        mock.assert();
    }

    #[tokio::test]
    async fn test_missing_optional_fields_default() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/youtube/v3/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"items": [{
                    "snippet": {
                        "publishedAt": "2024-03-01T12:30:00Z",
                        "title": "Untagged",
                        "channelTitle": "Someone"
                    },
                    "statistics": {"viewCount": "3"}
                }]}"#,
            )
            .create();

        let api = YouTubeDataApi::with_base_url("fake_key".to_string(), server.url());
        let details = api.fetch_details("abc123").await.unwrap().unwrap();

        assert_eq!(details.description, "");
        assert!(details.tags.is_empty());
        assert_eq!(details.view_count, 3);
        assert_eq!(details.like_count, 0);
        assert_eq!(details.comment_count, 0);
    }

    #[tokio::test]
    async fn test_no_items_is_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/youtube/v3/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"kind": "youtube#videoListResponse", "items": []}"#)
            .create();

        let api = YouTubeDataApi::with_base_url("fake_key".to_string(), server.url());
        assert_eq!(api.fetch_details("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/youtube/v3/videos")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"message": "API key not valid"}}"#)
            .create();

        let api = YouTubeDataApi::with_base_url("bad_key".to_string(), server.url());
        let result = api.fetch_details("abc123").await;

        match result {
            Err(PipelineError::Api { status, body, .. }) => {
                assert_eq!(status, 403);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbled_counter_is_rejected() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/youtube/v3/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"items": [{
                    "snippet": {
                        "publishedAt": "2024-03-01T12:30:00Z",
                        "title": "T",
                        "channelTitle": "C"
                    },
                    "statistics": {"viewCount": "lots"}
                }]}"#,
            )
            .create();

        let api = YouTubeDataApi::with_base_url("fake_key".to_string(), server.url());
        assert!(matches!(
            api.fetch_details("abc123").await,
            Err(PipelineError::Api { .. })
        ));
    }
}
