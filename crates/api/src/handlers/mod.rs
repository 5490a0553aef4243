pub mod auth;
pub mod chat;
pub mod like;
pub mod message;
pub mod playback;
pub mod purchase;
pub mod saved;
pub mod video;
