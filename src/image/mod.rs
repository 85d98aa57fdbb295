//! Image generation module.

mod provider;
pub mod providers;
mod types;

pub use provider::ImageFetcher;
pub use types::{GeneratedImage, GenerationMetadata, ImageFormat, ImagePayload};
