//! Handlers for video ingestion and the feed.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use boom_cloud::{data_uri, MediaStore, ResourceType, UploadRequest, UploadedMedia};
use boom_core::error::CoreError;
use boom_core::ids::parse_id;
use boom_core::media::{
    validate_thumbnail_attachment, validate_video_attachment, FIELD_THUMBNAIL, FIELD_VIDEO_FILE,
    THUMBNAIL_FOLDER, VIDEO_FOLDER,
};
use boom_core::types::DbId;
use boom_core::video::{validate_submission, VideoSource, VideoSubmission};
use boom_db::models::user::UserSummary;
use boom_db::models::video::{CreateVideo, Video, VideoDetail, VideoWithCreator};
use boom_db::repositories::video_repo::RECENT_LIMIT;
use boom_db::repositories::{UserRepo, VideoRepo};
use boom_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Multipart form
// ---------------------------------------------------------------------------

/// An uploaded file as received.
struct Attachment {
    content_type: String,
    bytes: Vec<u8>,
}

/// Fields of `POST /videos`, all optional until validated.
#[derive(Default)]
struct VideoForm {
    title: Option<String>,
    description: Option<String>,
    video_type: Option<String>,
    video_url: Option<String>,
    price: Option<String>,
    video_file: Option<Attachment>,
    thumbnail: Option<Attachment>,
}

impl VideoForm {
    fn submission(&self) -> VideoSubmission<'_> {
        VideoSubmission {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            video_type: self.video_type.as_deref(),
            video_url: self.video_url.as_deref(),
            price: self.price.as_deref(),
            has_video_file: self.video_file.is_some(),
        }
    }
}

async fn read_form(mut multipart: Multipart) -> AppResult<VideoForm> {
    let mut form = VideoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            FIELD_VIDEO_FILE | FIELD_THUMBNAIL => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty part for an untouched file input.
                if bytes.is_empty() {
                    continue;
                }
                let attachment = Attachment {
                    content_type,
                    bytes: bytes.to_vec(),
                };
                if name == FIELD_VIDEO_FILE {
                    form.video_file = Some(attachment);
                } else {
                    form.thumbnail = Some(attachment);
                }
            }
            "title" | "description" | "videoType" | "videoUrl" | "price" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let slot = match name.as_str() {
                    "title" => &mut form.title,
                    "description" => &mut form.description,
                    "videoType" => &mut form.video_type,
                    "videoUrl" => &mut form.video_url,
                    _ => &mut form.price,
                };
                *slot = Some(text);
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

async fn upload(
    media: &dyn MediaStore,
    attachment: &Attachment,
    folder: &str,
    resource_type: ResourceType,
) -> AppResult<UploadedMedia> {
    let uploaded = media
        .upload(UploadRequest {
            data_uri: data_uri(&attachment.content_type, &attachment.bytes),
            folder: folder.to_string(),
            resource_type,
        })
        .await?;
    Ok(uploaded)
}

// ---------------------------------------------------------------------------
// Expansion helpers (shared with the like/save/purchase handlers)
// ---------------------------------------------------------------------------

async fn summaries_by_id(pool: &DbPool, ids: &[DbId]) -> AppResult<HashMap<DbId, UserSummary>> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    let users = UserRepo::find_summaries(pool, &ids).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

/// Attach the creator's public profile to a video.
pub(crate) async fn with_creator(pool: &DbPool, video: Video) -> AppResult<VideoWithCreator> {
    let creator = UserRepo::find_summary(pool, video.creator_id).await?;
    Ok(VideoWithCreator { video, creator })
}

/// Batch form of [`with_creator`], one user query for the whole list.
pub(crate) async fn with_creators(
    pool: &DbPool,
    videos: Vec<Video>,
) -> AppResult<Vec<VideoWithCreator>> {
    let creator_ids: Vec<DbId> = videos.iter().map(|v| v.creator_id).collect();
    let users = summaries_by_id(pool, &creator_ids).await?;

    Ok(videos
        .into_iter()
        .map(|video| {
            let creator = users.get(&video.creator_id).cloned();
            VideoWithCreator { video, creator }
        })
        .collect())
}

/// Expand creators and like lists for the feed.
async fn with_details(pool: &DbPool, videos: Vec<Video>) -> AppResult<Vec<VideoDetail>> {
    let ids: Vec<DbId> = videos
        .iter()
        .flat_map(|v| std::iter::once(v.creator_id).chain(v.likes.iter().copied()))
        .collect();
    let users = summaries_by_id(pool, &ids).await?;

    Ok(videos
        .into_iter()
        .map(|video| {
            let creator = users.get(&video.creator_id).cloned();
            let liked_by = video
                .likes
                .iter()
                .filter_map(|id| users.get(id).cloned())
                .collect();
            VideoDetail {
                video,
                creator,
                liked_by,
            }
        })
        .collect())
}

/// Load a video or fail with 404.
pub(crate) async fn find_video(pool: &DbPool, id: DbId) -> AppResult<Video> {
    VideoRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/videos
///
/// Multipart upload. Short-form videos have their file forwarded to the
/// media store; long-form videos reference an external URL. A thumbnail is
/// uploaded for either kind when supplied. Media already uploaded is not
/// removed if a later step fails.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<VideoWithCreator>>)> {
    let form = read_form(multipart).await?;
    let validated = validate_submission(&form.submission())?;

    let max_bytes = state.config.max_attachment_bytes;
    if let Some(file) = &form.video_file {
        validate_video_attachment(&file.content_type, file.bytes.len(), max_bytes)?;
    }
    if let Some(thumb) = &form.thumbnail {
        validate_thumbnail_attachment(&thumb.content_type, thumb.bytes.len(), max_bytes)?;
    }

    // The creator comes from the token; make sure the account still exists
    // before spending time on uploads.
    if UserRepo::find_by_id(&state.pool, user.user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Unauthorized(
            "User no longer exists".into(),
        )));
    }

    let media = state.media.as_ref();

    let (video_file_url, video_file_id) = match (&validated.source, &form.video_file) {
        (VideoSource::Upload, Some(file)) => {
            let uploaded = upload(media, file, VIDEO_FOLDER, ResourceType::Video).await?;
            (Some(uploaded.secure_url), Some(uploaded.public_id))
        }
        _ => (None, None),
    };

    let (video_thumbnail_url, video_thumbnail_id) = match &form.thumbnail {
        Some(thumb) => {
            let uploaded = upload(media, thumb, THUMBNAIL_FOLDER, ResourceType::Image).await?;
            (Some(uploaded.secure_url), Some(uploaded.public_id))
        }
        None => (None, None),
    };

    let input = CreateVideo {
        video_type: validated.kind.as_str().to_string(),
        video_url: validated.video_url().map(str::to_string),
        price: validated.price(),
        title: validated.title,
        description: validated.description,
        video_file_url,
        video_file_id,
        video_thumbnail_url,
        video_thumbnail_id,
        creator_id: user.user_id,
    };
    let video = VideoRepo::create(&state.pool, &input).await?;

    tracing::info!(
        video_id = video.id,
        user_id = user.user_id,
        video_type = %video.video_type,
        "Video created",
    );

    let data = with_creator(&state.pool, video).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/v1/videos/recent
///
/// The newest videos with creator and like list expanded.
pub async fn list_recent(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<VideoDetail>>>> {
    let videos = VideoRepo::list_recent(&state.pool, RECENT_LIMIT).await?;
    let data = with_details(&state.pool, videos).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/videos/{video_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> AppResult<Json<DataResponse<VideoDetail>>> {
    let id = parse_id(&video_id, "video")?;
    let video = find_video(&state.pool, id).await?;

    let data = with_details(&state.pool, vec![video])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("video expansion returned nothing".into()))?;
    Ok(Json(DataResponse { data }))
}
