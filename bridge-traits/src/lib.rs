//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the player core and the host that
//! embeds it. Each trait is a capability the core needs but that is provided
//! differently in the browser and on the desktop.
//!
//! ## Traits
//!
//! ### Storage
//! - [`SongStore`](storage::SongStore) - Persisted song collection (IndexedDB / SQLite)
//!
//! ### Playback
//! - [`MediaElement`](media::MediaElement) - Host media element (source, play, pause, seek)
//! - [`PlayableUrls`](media::PlayableUrls) - Ephemeral references to audio payloads
//!
//! ### Presentation
//! - [`PlayerView`](view::PlayerView) - Widgets the renderer writes into
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Provides |
//! |----------|---------------------|----------|
//! | Web      | `bridge-wasm`       | all traits |
//! | Desktop  | `bridge-desktop`    | `SongStore` |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Platform
//! implementations convert their native errors (`JsValue`, `sqlx::Error`) into
//! it and keep the original message.
//!
//! ## Thread Safety
//!
//! `SongStore` and `LoggerSink` carry [`PlatformSendSync`](platform::PlatformSendSync)
//! so they can be shared across Tokio tasks natively. Media, URL and view
//! bridges are driven from the host's event loop only and carry no bounds.

pub mod error;
pub mod logging;
pub mod media;
pub mod platform;
pub mod storage;
pub mod view;

pub use error::BridgeError;

// Re-export commonly used types
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use media::{MediaElement, PlayableUrls};
pub use storage::{SongRecord, SongStore, UploadFile, MP3_MEDIA_TYPE};
pub use view::{PlayerView, TransportGlyph};
