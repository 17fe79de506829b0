use std::fmt;
use std::path::Path;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Largest image the endpoint accepts as inline request data.
pub const MAX_INLINE_IMAGE_BYTES: usize = 20 * 1024 * 1024;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImageError {
    #[error("image is empty")]
    Empty,

    #[error("image is too large: {len} bytes (max {max})")]
    TooLarge { len: usize, max: usize },

    #[error("unsupported image type: {0}")]
    UnsupportedMediaType(String),
}

//
// ─── MEDIA TYPE ───────────────────────────────────────────────────────────────
//

/// Image media types the vision endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Png,
    Jpeg,
    Webp,
    Heic,
    Heif,
}

impl MediaType {
    /// Parse a declared MIME type such as `image/png`.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::UnsupportedMediaType` for anything but the supported image types.
    pub fn parse(raw: &str) -> Result<Self, ImageError> {
        let essence = raw
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Ok(Self::Png),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/webp" => Ok(Self::Webp),
            "image/heic" => Ok(Self::Heic),
            "image/heif" => Ok(Self::Heif),
            _ => Err(ImageError::UnsupportedMediaType(raw.trim().to_string())),
        }
    }

    /// Infer the media type from a file name or path extension.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::UnsupportedMediaType` when the extension is missing or unknown.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ImageError::UnsupportedMediaType(path.display().to_string()))?;
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::Webp),
            "heic" => Ok(Self::Heic),
            "heif" => Ok(Self::Heif),
            other => Err(ImageError::UnsupportedMediaType(other.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Heic => "image/heic",
            Self::Heif => "image/heif",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── UPLOADED IMAGE ───────────────────────────────────────────────────────────
//

/// The photo of a missed question, as picked by the student.
///
/// Bytes are shared so that handing the image to a background request does not copy it.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    bytes: Arc<[u8]>,
    media_type: MediaType,
}

impl UploadedImage {
    /// # Errors
    ///
    /// Returns `ImageError::Empty` for zero bytes and `ImageError::TooLarge` above
    /// [`MAX_INLINE_IMAGE_BYTES`].
    pub fn new(bytes: impl Into<Arc<[u8]>>, media_type: MediaType) -> Result<Self, ImageError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > MAX_INLINE_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                len: bytes.len(),
                max: MAX_INLINE_IMAGE_BYTES,
            });
        }
        Ok(Self { bytes, media_type })
    }

    /// Build from bytes and a declared MIME type, falling back to the file name
    /// extension when the declared type is missing.
    ///
    /// # Errors
    ///
    /// Returns `ImageError` when neither source yields a supported type or the bytes are invalid.
    pub fn from_upload(
        bytes: impl Into<Arc<[u8]>>,
        declared_type: Option<&str>,
        file_name: &str,
    ) -> Result<Self, ImageError> {
        let media_type = match declared_type.map(str::trim).filter(|t| !t.is_empty()) {
            Some(declared) => MediaType::parse(declared)?,
            None => MediaType::from_path(file_name)?,
        };
        Self::new(bytes, media_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Standard base64 of the raw bytes, as sent to the endpoint.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URL for displaying the photo in a web view.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.to_base64())
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_parses_declared_types() {
        assert_eq!(MediaType::parse("image/png").unwrap(), MediaType::Png);
        assert_eq!(MediaType::parse(" IMAGE/JPEG ").unwrap(), MediaType::Jpeg);
        assert_eq!(MediaType::parse("image/jpg").unwrap(), MediaType::Jpeg);
        assert_eq!(
            MediaType::parse("image/webp; q=1").unwrap(),
            MediaType::Webp
        );
        assert!(matches!(
            MediaType::parse("application/pdf"),
            Err(ImageError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn media_type_from_extension() {
        assert_eq!(MediaType::from_path("a/b/photo.JPG").unwrap(), MediaType::Jpeg);
        assert_eq!(MediaType::from_path("scan.heic").unwrap(), MediaType::Heic);
        assert!(MediaType::from_path("notes.txt").is_err());
        assert!(MediaType::from_path("no_extension").is_err());
    }

    #[test]
    fn empty_image_is_rejected() {
        let err = UploadedImage::new(Vec::<u8>::new(), MediaType::Png).unwrap_err();
        assert_eq!(err, ImageError::Empty);
    }

    #[test]
    fn oversized_image_is_rejected() {
        let bytes = vec![0_u8; MAX_INLINE_IMAGE_BYTES + 1];
        let err = UploadedImage::new(bytes, MediaType::Png).unwrap_err();
        assert!(matches!(err, ImageError::TooLarge { .. }));
    }

    #[test]
    fn from_upload_prefers_declared_type() {
        let image = UploadedImage::from_upload(vec![1, 2, 3], Some("image/webp"), "x.png").unwrap();
        assert_eq!(image.media_type(), MediaType::Webp);

        let image = UploadedImage::from_upload(vec![1, 2, 3], Some(""), "x.png").unwrap();
        assert_eq!(image.media_type(), MediaType::Png);
    }

    #[test]
    fn data_url_embeds_media_type_and_base64() {
        let image = UploadedImage::new(b"hi".to_vec(), MediaType::Png).unwrap();
        assert_eq!(image.to_base64(), "aGk=");
        assert_eq!(image.data_url(), "data:image/png;base64,aGk=");
    }
}
