//! The components module contains all shared components for our app.

mod app;
mod audio_player;
mod icons;
mod recitation_uploader;
mod tag_input;
mod toast;

pub use app::*;
pub use audio_player::*;
pub use icons::*;
pub use recitation_uploader::*;
pub use tag_input::*;
pub use toast::*;
