use log::{debug, error, info};
use std::env;
use std::sync::Arc;

use yt_optimizer::{MemoryStore, PipelineConfig, User, UserStore, VideoPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the URL from command-line arguments
    let args: Vec<String> = env::args().collect();
    let url = args
        .get(1)
        .ok_or("Usage: yt-optimizer <youtube-url>")?;

    let config = PipelineConfig::load()?;
    debug!("Loaded configuration: model {}", config.llm.model);

    let store = Arc::new(MemoryStore::new());
    let user = store.insert_user(User::new("local@localhost")).await?;
    let pipeline = VideoPipeline::from_config(config, store)?;

    let video = pipeline.identify_video(url, user.id).await.map_err(|e| {
        error!("Unable to identify video: {e}");
        e
    })?;
    info!("Identified \"{}\" as video {}", video.details.title, video.id);

    let response = pipeline.analyze_video(&video.id.to_string()).await.map_err(|e| {
        error!("Unable to analyze video: {e}");
        e
    })?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
