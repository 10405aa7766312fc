//! Core engines of a wallpaper-strip overlay widget.
//!
//! Three cooperating pieces, driven by a host event loop at ~60 Hz:
//!
//! - [`scroll::ScrollSurface`] turns pointer drags into kinetic scrolling
//!   over an integer offset, with exponential friction after release.
//! - [`scaling`] recomputes each thumbnail's displayed size from its
//!   distance to the viewport center, the "focus lens" effect.
//! - [`thumbnails::ThumbnailCache`] maps source paths (SHA-1 of the path
//!   string) to pre-scaled JPEGs on disk and reconciles against the live
//!   wallpaper tree at startup.
//!
//! [`strip::WallpaperStrip`] ties them together behind the pointer/tick
//! entry points a widget shell needs. Everything here is single-threaded
//! and event-driven; the host loop serializes pointer events and ticks, so
//! the engines share the scroll offset without locking.

pub mod layout;
pub mod models;
pub mod scaling;
pub mod scanner;
pub mod scroll;
pub mod strip;
pub mod thumbnails;

pub use models::ThumbnailItem;
pub use scroll::{ScrollState, ScrollSurface};
pub use strip::WallpaperStrip;
pub use thumbnails::{CachedThumbnail, ThumbnailCache, ThumbnailError};
