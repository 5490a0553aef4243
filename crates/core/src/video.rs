//! Video kinds and submission validation.
//!
//! A submission arrives as loosely typed form fields. [`validate_submission`]
//! turns it into a [`ValidatedVideo`] or a user-facing validation error, in
//! the same order the checks are documented on each step below.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Wire value for short-form videos.
pub const SHORT_FORM: &str = "Short-Form";

/// Wire value for long-form videos.
pub const LONG_FORM: &str = "Long-Form";

/// All valid video type values.
pub const VALID_VIDEO_TYPES: &[&str] = &[SHORT_FORM, LONG_FORM];

/// The two video modalities the platform accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoKind {
    /// An uploaded file hosted by the media store.
    #[serde(rename = "Short-Form")]
    ShortForm,
    /// An externally hosted video referenced by URL, optionally priced.
    #[serde(rename = "Long-Form")]
    LongForm,
}

impl VideoKind {
    /// Parse the wire value (`"Short-Form"` / `"Long-Form"`).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            SHORT_FORM => Ok(VideoKind::ShortForm),
            LONG_FORM => Ok(VideoKind::LongForm),
            _ => Err(CoreError::invalid("Invalid video type")),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VideoKind::ShortForm => SHORT_FORM,
            VideoKind::LongForm => LONG_FORM,
        }
    }
}

/// Raw fields of a video creation request.
#[derive(Debug, Default, Clone)]
pub struct VideoSubmission<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub video_type: Option<&'a str>,
    pub video_url: Option<&'a str>,
    pub price: Option<&'a str>,
    /// Whether a `videoFile` attachment was supplied.
    pub has_video_file: bool,
}

/// Where the playable media lives.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoSource {
    /// The attached file must be forwarded to the media store.
    Upload,
    /// Externally hosted; `price` is what a buyer pays.
    External { url: String, price: f64 },
}

/// A submission that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedVideo {
    pub title: String,
    pub description: String,
    pub kind: VideoKind,
    pub source: VideoSource,
}

impl ValidatedVideo {
    /// Price stored on the row. Short-form videos are always free.
    pub fn price(&self) -> f64 {
        match &self.source {
            VideoSource::Upload => 0.0,
            VideoSource::External { price, .. } => *price,
        }
    }

    pub fn video_url(&self) -> Option<&str> {
        match &self.source {
            VideoSource::Upload => None,
            VideoSource::External { url, .. } => Some(url),
        }
    }
}

/// Validate a video submission.
///
/// 1. Title, description and video type must all be present and non-blank.
/// 2. The video type must be a known kind.
/// 3. Title and description must fit their length limits.
/// 4. Short-form requires a video attachment.
/// 5. Long-form requires an `http(s)` URL; its price is parsed leniently.
pub fn validate_submission(sub: &VideoSubmission<'_>) -> Result<ValidatedVideo, CoreError> {
    let title = non_blank(sub.title);
    let description = non_blank(sub.description);
    let video_type = non_blank(sub.video_type);

    let (Some(title), Some(description), Some(video_type)) = (title, description, video_type)
    else {
        return Err(CoreError::invalid(
            "Title, description, and video type are required",
        ));
    };

    let kind = VideoKind::parse(video_type)?;

    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(CoreError::invalid(format!(
            "Title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(CoreError::invalid(format!(
            "Description must be at most {MAX_DESCRIPTION_CHARS} characters"
        )));
    }

    let source = match kind {
        VideoKind::ShortForm => {
            if !sub.has_video_file {
                return Err(CoreError::invalid("Video file is required for Short-Form"));
            }
            VideoSource::Upload
        }
        VideoKind::LongForm => {
            let url = non_blank(sub.video_url)
                .ok_or_else(|| CoreError::invalid("Video URL is required for Long-Form"))?;
            if !is_http_url(url) {
                return Err(CoreError::invalid("Video URL must be a valid http(s) URL"));
            }
            VideoSource::External {
                url: url.to_string(),
                price: parse_price(sub.price),
            }
        }
    };

    Ok(ValidatedVideo {
        title: title.to_string(),
        description: description.to_string(),
        kind,
        source,
    })
}

/// Parse a price field leniently.
///
/// Takes the longest leading numeric prefix (so `"5"`, `"5.50"` and `"5 USD"`
/// all parse). Absent, unparsable, non-finite or negative input yields `0`.
pub fn parse_price(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let s = raw.trim_start();

    let mut end = s.len();
    while end > 0 {
        if s.is_char_boundary(end) {
            if let Ok(v) = s[..end].parse::<f64>() {
                // `parse` accepts "inf"/"NaN"; those are not prices.
                return if v.is_finite() && v >= 0.0 { v } else { 0.0 };
            }
        }
        end -= 1;
    }
    0.0
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
