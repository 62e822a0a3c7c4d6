//! @acp:module "Video Command"
//! @acp:summary "Generate a short teaching video"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Each run is a fresh process, so a rejected key is reported through
//! [`crate::error::DeskError::ReauthorizationRequired`] and the `main` error printer shows
//! how to pick a new one.

use anyhow::{bail, Result};
use console::style;

use super::output::spinner;
use crate::collab::{AspectRatio, Collaborator, HttpCollaborator, MediaLocator};
use crate::config::Config;

/// Options for the video command
#[derive(Debug, Clone)]
pub struct VideoOptions {
    pub prompt: String,
    pub aspect: AspectRatio,
}

/// Execute the video command
pub fn execute_video(options: VideoOptions, config: &Config) -> Result<()> {
    let service = HttpCollaborator::from_config(&config.collaborator)?;
    let media = video_with(&service, &options)?;

    println!("{} Video ready: {}", style("✓").green(), style(&media.uri).cyan());
    println!("  Download it with the same API key (header x-goog-api-key)");

    Ok(())
}

/// Run the video request against any collaborator
pub fn video_with<C: Collaborator + ?Sized>(
    service: &C,
    options: &VideoOptions,
) -> Result<MediaLocator> {
    if options.prompt.trim().is_empty() {
        bail!("A video prompt is required");
    }

    let pb = spinner("Generating video (this can take a few minutes)...");
    let result = service.generate_video(&options.prompt, options.aspect);
    pb.finish_and_clear();

    Ok(result?)
}
