use std::fmt;
use std::str::FromStr;

/// Largest accepted upload, in bytes.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Extension used when the original filename carries none.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Instruction sent alongside every image.
pub const POEM_INSTRUCTION: &str = "Write a short, beautiful poem based on this image. Capture the mood, atmosphere, and essence of what you see.";

/// Media types accepted for upload. `image/jpg` is non-standard but browsers send it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMediaType {
    Jpeg,
    Jpg,
    Png,
    Gif,
    Webp,
}

impl ImageMediaType {
    pub const ALL: [ImageMediaType; 5] = [
        ImageMediaType::Jpeg,
        ImageMediaType::Jpg,
        ImageMediaType::Png,
        ImageMediaType::Gif,
        ImageMediaType::Webp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Jpg => "image/jpg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// Comma separated allow-list, as shown to clients.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(ImageMediaType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ImageMediaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for ImageMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension of `file_name`: whatever follows the last `.`.
///
/// Falls back to [`DEFAULT_EXTENSION`] when there is no dot, nothing after it,
/// or the suffix contains anything but ASCII alphanumerics (it ends up in an
/// object key). That last case is stricter than a plain "after the last dot"
/// split: `photo.tar gz` yields `jpg`, not `tar gz`.
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            ext
        }
        _ => DEFAULT_EXTENSION,
    }
}

/// Object key for an upload: `<id>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(id: &str, file_name: &str) -> Self {
        Self(format!("{}.{}", id, file_extension(file_name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
