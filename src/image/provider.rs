//! Image fetcher trait.

use crate::error::Result;
use crate::image::types::GeneratedImage;
use async_trait::async_trait;

/// Turns one prompt into the raw bytes of one generated image.
///
/// Implementations perform no retries; a failure is returned to the caller
/// as-is.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Generates an image for the given prompt.
    async fn fetch(&self, prompt: &str) -> Result<GeneratedImage>;

    /// Returns the name of this fetcher for display.
    fn name(&self) -> &str;
}
