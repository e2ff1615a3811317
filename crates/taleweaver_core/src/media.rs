//! Reference image types.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// Image formats accepted as a reference photo.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum ImageMediaType {
    /// JPEG image
    #[display("image/jpeg")]
    Jpeg,
    /// PNG image
    #[display("image/png")]
    Png,
    /// WebP image
    #[display("image/webp")]
    Webp,
}

impl ImageMediaType {
    /// MIME type string.
    pub fn mime(&self) -> &'static str {
        match self {
            ImageMediaType::Jpeg => "image/jpeg",
            ImageMediaType::Png => "image/png",
            ImageMediaType::Webp => "image/webp",
        }
    }

    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageMediaType::Jpeg => "jpg",
            ImageMediaType::Png => "png",
            ImageMediaType::Webp => "webp",
        }
    }

    /// Resolve from a MIME type, ignoring parameters and case.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_core::ImageMediaType;
    ///
    /// assert_eq!(ImageMediaType::from_mime("image/PNG"), Some(ImageMediaType::Png));
    /// assert_eq!(ImageMediaType::from_mime("image/jpg"), Some(ImageMediaType::Jpeg));
    /// assert_eq!(ImageMediaType::from_mime("image/gif"), None);
    /// ```
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageMediaType::Jpeg),
            "image/png" => Some(ImageMediaType::Png),
            "image/webp" => Some(ImageMediaType::Webp),
            _ => None,
        }
    }

    /// Resolve from a file extension (without the dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageMediaType::Jpeg),
            "png" => Some(ImageMediaType::Png),
            "webp" => Some(ImageMediaType::Webp),
            _ => None,
        }
    }
}

/// A reference photo: raw bytes plus declared media type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct ReferenceImage {
    /// Raw image bytes
    bytes: Vec<u8>,
    /// Declared media type
    media_type: ImageMediaType,
}

impl ReferenceImage {
    /// Create a reference image.
    pub fn new(bytes: impl Into<Vec<u8>>, media_type: ImageMediaType) -> Self {
        Self {
            bytes: bytes.into(),
            media_type,
        }
    }

    /// Whether the image carries no data.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Encode as a `data:` URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_core::{ImageMediaType, ReferenceImage};
    ///
    /// let image = ReferenceImage::new(vec![1, 2, 3], ImageMediaType::Png);
    /// assert_eq!(image.to_data_url(), "data:image/png;base64,AQID");
    /// ```
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type.mime(),
            BASE64.encode(&self.bytes)
        )
    }
}
