use thiserror::Error;

use super::value_objects::{ImageMediaType, MAX_IMAGE_BYTES};

/// Reasons an `image` form field is rejected before any side effect happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageValidationError {
    #[error("No image file provided")]
    Missing,
    #[error("Invalid image file format")]
    NotAFile,
    #[error("Image file too large. Maximum size is {}MB", MAX_IMAGE_BYTES / (1024 * 1024))]
    TooLarge,
    #[error("Invalid file type. Allowed types: {}", ImageMediaType::allowed_list())]
    UnsupportedMediaType,
}
