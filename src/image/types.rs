//! Core types for image generation.

use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the value the generation API expects for `output_format`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::WebP => "webp",
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Where the first result element says the image bytes live.
///
/// The API returns one form or the other. Inline payloads win when both
/// fields are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Base64-encoded image bytes carried in the response body.
    InlinePayload(String),
    /// A URL the bytes must be downloaded from with a second request.
    RemoteUrl(String),
}

impl ImagePayload {
    /// Resolves the payload form from the two optional response fields.
    ///
    /// Returns `None` when neither field is present.
    pub fn from_fields(b64_json: Option<String>, url: Option<String>) -> Option<Self> {
        match (b64_json, url) {
            (Some(b64), _) => Some(Self::InlinePayload(b64)),
            (None, Some(url)) => Some(Self::RemoteUrl(url)),
            (None, None) => None,
        }
    }
}

/// Metadata about the generation process.
#[derive(Debug, Clone, Default)]
pub struct GenerationMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Generation duration in milliseconds.
    pub duration_ms: Option<u64>,
    /// Whether the bytes came from a secondary URL download.
    pub downloaded: bool,
}

/// A generated image with its data and metadata.
#[derive(Debug, Clone)]
#[must_use = "generated image should be saved or processed"]
pub struct GeneratedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Image format.
    pub format: ImageFormat,
    /// Generation metadata.
    pub metadata: GenerationMetadata,
}

impl GeneratedImage {
    /// Creates a new generated image.
    pub fn new(data: Vec<u8>, format: ImageFormat, metadata: GenerationMetadata) -> Self {
        Self {
            data,
            format,
            metadata,
        }
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Saves the image to the specified path, creating parent directories.
    ///
    /// The bytes land in a temporary file next to `path` and are renamed
    /// into place, so `path` either keeps its old contents or holds the
    /// complete new image.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".cluegen-")
            .suffix(".part")
            .tempfile_in(parent)?;
        tmp.write_all(&self.data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"short"), None);
    }

    #[test]
    fn test_payload_decision_order() {
        assert_eq!(
            ImagePayload::from_fields(Some("AQID".into()), None),
            Some(ImagePayload::InlinePayload("AQID".into()))
        );
        assert_eq!(
            ImagePayload::from_fields(None, Some("https://x/img.png".into())),
            Some(ImagePayload::RemoteUrl("https://x/img.png".into()))
        );
        // Inline wins when both are present
        assert_eq!(
            ImagePayload::from_fields(Some("AQID".into()), Some("https://x/img.png".into())),
            Some(ImagePayload::InlinePayload("AQID".into()))
        );
        assert_eq!(ImagePayload::from_fields(None, None), None);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("clues").join("clue-01.png");
        let image = GeneratedImage::new(
            PNG_MAGIC.to_vec(),
            ImageFormat::Png,
            GenerationMetadata::default(),
        );

        image.save(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), PNG_MAGIC.to_vec());
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_save_replaces_existing_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clue-02.png");
        std::fs::write(&path, b"old image").unwrap();
        let image = GeneratedImage::new(
            PNG_MAGIC.to_vec(),
            ImageFormat::Png,
            GenerationMetadata::default(),
        );

        image.save(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), PNG_MAGIC.to_vec());
        assert_eq!(dir_entries(dir.path()), ["clue-02.png"]);
    }

    #[test]
    fn test_failed_save_leaves_no_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path makes the final rename fail
        let path = dir.path().join("clue-03.png");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();
        let image = GeneratedImage::new(
            PNG_MAGIC.to_vec(),
            ImageFormat::Png,
            GenerationMetadata::default(),
        );

        let err = image.save(&path).unwrap_err();

        assert!(matches!(err, crate::error::ClueGenError::Io(_)));
        assert!(path.is_dir());
        assert_eq!(dir_entries(dir.path()), ["clue-03.png"]);
    }
}
