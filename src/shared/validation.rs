use crate::shared::constants::{ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE_BYTES};

/// Reason returned when a submission carries no image part
pub const ERROR_NO_FILE: &str = "No file selected";

/// Reason returned for media types outside the allow-list
pub const ERROR_BAD_TYPE: &str = "Only JPEG, PNG, and WebP images are allowed";

/// Reason returned when the upload exceeds the size cap
pub const ERROR_TOO_LARGE: &str = "File size must be less than 10MB";

/// Checks an uploaded image before any backend call is made.
///
/// Inspects metadata only (declared media type and byte length), never the
/// content. `None` means no file part was present in the request. Check order
/// matches the user-facing flow: missing file, then type, then size.
pub fn validate_image_file(file: Option<(&str, usize)>) -> Result<(), &'static str> {
    let Some((content_type, size_bytes)) = file else {
        return Err(ERROR_NO_FILE);
    };

    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(ERROR_BAD_TYPE);
    }

    if size_bytes > MAX_IMAGE_SIZE_BYTES {
        return Err(ERROR_TOO_LARGE);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_rejected() {
        assert_eq!(validate_image_file(None), Err(ERROR_NO_FILE));
    }

    #[test]
    fn test_zero_byte_jpeg_passes() {
        assert_eq!(validate_image_file(Some(("image/jpeg", 0))), Ok(()));
    }

    #[test]
    fn test_exactly_ten_mib_passes() {
        assert_eq!(
            validate_image_file(Some(("image/png", MAX_IMAGE_SIZE_BYTES))),
            Ok(())
        );
    }

    #[test]
    fn test_oversized_png_rejected_with_size_reason() {
        let eleven_mib = 11 * 1024 * 1024;
        assert_eq!(
            validate_image_file(Some(("image/png", eleven_mib))),
            Err(ERROR_TOO_LARGE)
        );
    }

    #[test]
    fn test_gif_rejected_with_type_reason() {
        assert_eq!(
            validate_image_file(Some(("image/gif", 1024))),
            Err(ERROR_BAD_TYPE)
        );
    }

    #[test]
    fn test_all_allowed_types_pass() {
        for content_type in ALLOWED_IMAGE_TYPES {
            assert_eq!(validate_image_file(Some((content_type, 2048))), Ok(()));
        }
    }

    #[test]
    fn test_type_checked_before_size() {
        // An oversized GIF reports the type problem, matching the check order
        let eleven_mib = 11 * 1024 * 1024;
        assert_eq!(
            validate_image_file(Some(("image/gif", eleven_mib))),
            Err(ERROR_BAD_TYPE)
        );
    }
}
