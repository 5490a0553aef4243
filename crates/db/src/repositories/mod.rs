//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod chat_repo;
pub mod message_repo;
pub mod purchase_repo;
pub mod saved_video_repo;
pub mod user_repo;
pub mod video_repo;

pub use chat_repo::ChatRepo;
pub use message_repo::MessageRepo;
pub use purchase_repo::PurchaseRepo;
pub use saved_video_repo::SavedVideoRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
