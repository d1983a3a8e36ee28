//! # Sigil Shared
//!
//! Plain data types used by every Sigil crate.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a renderer, a font stack or a windowing
//! crate. Anything that talks to a collaborator lives in `sigil_ui`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod id;
pub mod math;

pub use constants::{
    DEFAULT_DRAG_START_THRESHOLD, DEFAULT_GROUP_ID, DEFAULT_IMAGE_ID, DEFAULT_VIRTUAL_RESOLUTION,
};
pub use id::HashedId;
pub use math::{Rect, Vec2, Vec2i, Vec4};
