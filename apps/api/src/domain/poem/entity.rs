use bytes::Bytes;

use super::{
    errors::ImageValidationError,
    value_objects::{ImageMediaType, MAX_IMAGE_BYTES},
};

/// An `image` form field that passed validation.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub media_type: ImageMediaType,
    pub data: Bytes,
}

impl UploadedImage {
    /// Validates a received form field, in client-visible order: file payload,
    /// size, then media type.
    ///
    /// `file_name` is `None` when the field was sent as a plain string.
    pub fn from_form_field(
        file_name: Option<String>,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<Self, ImageValidationError> {
        let file_name = file_name.ok_or(ImageValidationError::NotAFile)?;

        if data.len() > MAX_IMAGE_BYTES {
            return Err(ImageValidationError::TooLarge);
        }

        let media_type = content_type
            .and_then(|ct| ct.parse::<ImageMediaType>().ok())
            .ok_or(ImageValidationError::UnsupportedMediaType)?;

        Ok(Self {
            file_name,
            media_type,
            data,
        })
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Outcome of a successful request: the poem and where its image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPoem {
    pub poem: String,
    pub image_url: String,
}
