//! OpenAI image generation fetcher (gpt-image-1).

use crate::config::{ApiKey, API_KEY_ENV, DEFAULT_TIMEOUT};
use crate::error::{ClueGenError, Result};
use crate::image::provider::ImageFetcher;
use crate::image::types::{GeneratedImage, GenerationMetadata, ImageFormat, ImagePayload};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const GENERATIONS_PATH: &str = "/images/generations";

/// Model identifier sent with every request.
pub const MODEL: &str = "gpt-image-1";
/// Output size sent with every request.
pub const SIZE: &str = "1536x1024";
/// Quality tier sent with every request.
pub const QUALITY: &str = "medium";
/// Output format requested for every image.
pub const OUTPUT_FORMAT: ImageFormat = ImageFormat::Png;

/// Builder for OpenAiImageFetcher.
#[derive(Debug, Clone)]
pub struct OpenAiImageFetcherBuilder {
    api_key: Option<ApiKey>,
    base_url: String,
    timeout: Duration,
}

impl Default for OpenAiImageFetcherBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OpenAiImageFetcherBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Overrides the API base URL (scheme, host and version prefix).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the timeout applied to each request, including URL downloads.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the fetcher.
    pub fn build(self) -> Result<OpenAiImageFetcher> {
        let api_key = self
            .api_key
            .ok_or(ClueGenError::MissingApiKey(API_KEY_ENV))?;

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(OpenAiImageFetcher {
            client,
            api_key,
            generations_url: format!("{}{}", self.base_url, GENERATIONS_PATH),
        })
    }
}

/// OpenAI image generation fetcher.
#[derive(Debug)]
pub struct OpenAiImageFetcher {
    client: reqwest::Client,
    api_key: ApiKey,
    generations_url: String,
}

impl OpenAiImageFetcher {
    /// Creates a new `OpenAiImageFetcherBuilder`.
    pub fn builder() -> OpenAiImageFetcherBuilder {
        OpenAiImageFetcherBuilder::new()
    }

    /// Resolves the first result element into a payload form.
    fn resolve_payload(response: OpenAiImageResponse) -> Result<ImagePayload> {
        let first = response
            .data
            .into_iter()
            .next()
            .ok_or(ClueGenError::EmptyResponse)?;

        ImagePayload::from_fields(first.b64_json, first.url).ok_or_else(|| {
            ClueGenError::MalformedResponse("response missing both b64_json and url".into())
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url = %url, "downloading image from result URL");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await?);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Reads a non-2xx response into an `Api` error carrying the body verbatim.
///
/// A body that cannot be read surfaces as the transport error instead.
async fn api_error(response: reqwest::Response) -> Result<ClueGenError> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    Ok(ClueGenError::Api {
        status,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

#[async_trait]
impl ImageFetcher for OpenAiImageFetcher {
    async fn fetch(&self, prompt: &str) -> Result<GeneratedImage> {
        let start = Instant::now();
        let body = OpenAiImageRequest::new(prompt);

        let response = self
            .client
            .post(&self.generations_url)
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await?);
        }

        let bytes = response.bytes().await?;
        let openai_response: OpenAiImageResponse = serde_json::from_slice(&bytes)?;

        let (data, downloaded) = match Self::resolve_payload(openai_response)? {
            ImagePayload::InlinePayload(b64) => {
                use base64::Engine;
                let data = base64::engine::general_purpose::STANDARD
                    .decode(b64.trim())
                    .map_err(|e| ClueGenError::Decode(e.to_string()))?;
                (data, false)
            }
            ImagePayload::RemoteUrl(url) => (self.download(&url).await?, true),
        };

        if data.is_empty() {
            return Err(ClueGenError::MalformedResponse(
                "image payload was empty".into(),
            ));
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            model = MODEL,
            size = SIZE,
            bytes = data.len(),
            duration_ms,
            downloaded,
            "image generation complete"
        );

        let format = ImageFormat::from_magic_bytes(&data).unwrap_or(OUTPUT_FORMAT);

        Ok(GeneratedImage::new(
            data,
            format,
            GenerationMetadata {
                model: Some(MODEL.to_string()),
                duration_ms: Some(duration_ms),
                downloaded,
            },
        ))
    }

    fn name(&self) -> &str {
        "OpenAI (gpt-image-1)"
    }
}

#[derive(Debug, Serialize)]
struct OpenAiImageRequest<'a> {
    model: &'static str,
    prompt: &'a str,
    size: &'static str,
    quality: &'static str,
    output_format: &'static str,
}

impl<'a> OpenAiImageRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            model: MODEL,
            prompt,
            size: SIZE,
            quality: QUALITY,
            output_format: OUTPUT_FORMAT.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiImageResponse {
    #[serde(default)]
    data: Vec<OpenAiImageData>,
}

#[derive(Debug, Deserialize)]
struct OpenAiImageData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    b64_json: Option<String>,
}
