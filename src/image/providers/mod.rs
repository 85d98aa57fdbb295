//! Image generation backends.

pub mod openai;

pub use openai::{OpenAiImageFetcher, OpenAiImageFetcherBuilder};
