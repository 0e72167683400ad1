//! Image upload validation.
//!
//! Uploads are limited to common web image formats and 5 MiB.

use crate::error::ValidationError;

/// Maximum accepted upload size in bytes.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Image formats accepted for product photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageKind {
    /// Detect the image kind from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// MIME type sent when storing the asset.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

/// Validate an uploaded file by name and size.
///
/// # Errors
///
/// Returns `UnsupportedFileType` for extensions other than jpg, jpeg, png, gif
/// or webp, and `FileTooLarge` above [`MAX_UPLOAD_BYTES`].
pub fn validate_image_upload(file_name: &str, size: usize) -> Result<ImageKind, ValidationError> {
    let kind = file_name
        .rsplit_once('.')
        .and_then(|(_, ext)| ImageKind::from_extension(ext))
        .ok_or_else(|| ValidationError::UnsupportedFileType(file_name.to_string()))?;

    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }

    Ok(kind)
}

/// Reduce a client-supplied file name to a safe single path segment.
///
/// Keeps ASCII letters, digits, `.`, `-` and `_`; everything else becomes `_`.
/// Directory components are dropped.
#[must_use]
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_extensions_case_insensitive() {
        assert_eq!(validate_image_upload("bread.JPG", 10), Ok(ImageKind::Jpeg));
        assert_eq!(validate_image_upload("bread.jpeg", 10), Ok(ImageKind::Jpeg));
        assert_eq!(validate_image_upload("bread.png", 10), Ok(ImageKind::Png));
        assert_eq!(validate_image_upload("bread.gif", 10), Ok(ImageKind::Gif));
        assert_eq!(validate_image_upload("bread.WebP", 10), Ok(ImageKind::Webp));
    }

    #[test]
    fn test_rejects_other_extensions() {
        assert!(matches!(
            validate_image_upload("menu.pdf", 10),
            Err(ValidationError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            validate_image_upload("no-extension", 10),
            Err(ValidationError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_image_upload("a.png", MAX_UPLOAD_BYTES).is_ok());
        assert_eq!(
            validate_image_upload("a.png", MAX_UPLOAD_BYTES + 1),
            Err(ValidationError::FileTooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                max: MAX_UPLOAD_BYTES,
            })
        );
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("croissant.jpg"), "croissant.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\photos\\my bread.png"), "my_bread.png");
        assert_eq!(sanitize_file_name("식빵.png"), "__.png");
        assert_eq!(sanitize_file_name("..."), "upload");
    }
}
