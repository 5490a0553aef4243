//! Domain rules for the Boom video platform.
//!
//! Everything in this crate is pure: no database, no HTTP, no media store.
//! Handlers in `boom-api` call into these modules to validate input and make
//! gating decisions before touching persistence.

pub mod chat;
pub mod error;
pub mod ids;
pub mod media;
pub mod playback;
pub mod purchase;
pub mod social;
pub mod types;
pub mod video;
