//! Tunables for the upload form. Defaults match the shipped behaviour; a JSON
//! override may be placed in LocalStorage for experimentation.
use serde::Deserialize;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const CONFIG_KEY: &str = "recitation_upload.config";

pub const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub accepted_mime_types: Vec<String>,
    pub max_file_size_bytes: u64,
    pub max_tags: usize,
    pub progress_step: u8,
    pub progress_interval_ms: u32,
    pub upload_delay_ms: u32,
    pub reset_delay_ms: u32,
    pub toast_duration_ms: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accepted_mime_types: vec!["audio/mpeg".to_string(), "audio/mp3".to_string()],
            max_file_size_bytes: 20 * MIB,
            max_tags: 5,
            progress_step: 5,
            progress_interval_ms: 200,
            upload_delay_ms: 3000,
            reset_delay_ms: 1500,
            toast_duration_ms: 4000,
        }
    }
}

impl UploadConfig {
    pub fn accepts_mime(&self, mime: &str) -> bool {
        self.accepted_mime_types.iter().any(|accepted| accepted == mime)
    }

    /// Parse a (possibly partial) JSON override. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let raw = match LocalStorage::raw().get_item(CONFIG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(err) => {
                tracing::warn!(?err, "local storage unavailable, using default config");
                return Self::default();
            }
        };
        match Self::from_json(&raw) {
            Ok(config) => {
                tracing::info!("loaded config override from local storage");
                config
            }
            Err(err) => {
                tracing::warn!(%err, "malformed config override, using defaults");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
