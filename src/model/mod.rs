//! Platform-independent state behind the upload page widgets.

pub mod playback;
pub mod tags;
pub mod upload;

pub use playback::{track_fraction, PlaybackState, TransportCommand};
pub use tags::{KeyEffect, TagKey, TagSet, DEFAULT_MAX_TAGS};
pub use upload::{BackgroundType, PreviewSource, RecitationType, TickOutcome, UploadForm};
