//! Attachment rules for video uploads.
//!
//! Two optional file fields accompany a video submission: `videoFile` (the
//! short-form upload) and `videoThumbnail`. Both are forwarded to the media
//! store, each into its own folder.

use crate::error::CoreError;

/// Multipart field name of the video attachment.
pub const FIELD_VIDEO_FILE: &str = "videoFile";

/// Multipart field name of the thumbnail attachment.
pub const FIELD_THUMBNAIL: &str = "videoThumbnail";

/// Media store folder for short-form video files.
pub const VIDEO_FOLDER: &str = "social_media_videos";

/// Media store folder for thumbnails.
pub const THUMBNAIL_FOLDER: &str = "social_media_thumbnails";

/// Default per-attachment size limit (10 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// The only accepted video container.
pub const VIDEO_MIME: &str = "video/mp4";

/// Validate the short-form video attachment.
pub fn validate_video_attachment(
    content_type: &str,
    size: usize,
    max_bytes: usize,
) -> Result<(), CoreError> {
    if !content_type.eq_ignore_ascii_case(VIDEO_MIME) {
        return Err(CoreError::invalid("Invalid file type: videoFile must be .mp4"));
    }
    check_size(FIELD_VIDEO_FILE, size, max_bytes)
}

/// Validate the thumbnail attachment (any `image/*` type).
pub fn validate_thumbnail_attachment(
    content_type: &str,
    size: usize,
    max_bytes: usize,
) -> Result<(), CoreError> {
    if !content_type.to_ascii_lowercase().starts_with("image/") {
        return Err(CoreError::invalid(
            "Invalid file type: videoThumbnail must be an image",
        ));
    }
    check_size(FIELD_THUMBNAIL, size, max_bytes)
}

fn check_size(field: &str, size: usize, max_bytes: usize) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::invalid(format!("{field} must not be empty")));
    }
    if size > max_bytes {
        return Err(CoreError::invalid(format!(
            "{field} exceeds the maximum size of {max_bytes} bytes"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const MAX: usize = DEFAULT_MAX_ATTACHMENT_BYTES;

    #[test]
    fn mp4_accepted() {
        assert!(validate_video_attachment("video/mp4", 1024, MAX).is_ok());
        assert!(validate_video_attachment("Video/MP4", 1024, MAX).is_ok());
    }

    #[test]
    fn other_video_types_rejected() {
        assert_matches!(
            validate_video_attachment("video/webm", 1024, MAX),
            Err(CoreError::Validation(msg)) if msg.contains(".mp4")
        );
    }

    #[test]
    fn oversized_attachment_rejected() {
        assert_matches!(
            validate_video_attachment("video/mp4", MAX + 1, MAX),
            Err(CoreError::Validation(_))
        );
        assert!(validate_video_attachment("video/mp4", MAX, MAX).is_ok());
    }

    #[test]
    fn empty_attachment_rejected() {
        assert_matches!(
            validate_thumbnail_attachment("image/png", 0, MAX),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn thumbnail_must_be_image() {
        assert!(validate_thumbnail_attachment("image/jpeg", 10, MAX).is_ok());
        assert_matches!(
            validate_thumbnail_attachment("application/pdf", 10, MAX),
            Err(CoreError::Validation(_))
        );
    }
}
