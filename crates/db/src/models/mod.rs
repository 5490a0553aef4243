//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Joined views (`*Detail`) that embed referenced rows for API responses

pub mod chat;
pub mod purchase;
pub mod saved_video;
pub mod status;
pub mod user;
pub mod video;
