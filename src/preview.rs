//! `blob:` URLs for previewing a picked file before it is uploaded.
use crate::model::PreviewSource;

/// Object URL owned by the upload form. Revoked when dropped, so replacing,
/// clearing or resetting the selected file releases it.
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    #[cfg(target_arch = "wasm32")]
    pub fn for_file(file: &web_sys::File) -> Option<Self> {
        match web_sys::Url::create_object_url_with_blob(file) {
            Ok(url) => {
                tracing::debug!(%url, "preview url created");
                Some(Self { url })
            }
            Err(err) => {
                tracing::warn!(?err, "could not create preview url");
                None
            }
        }
    }
}

impl PreviewSource for ObjectUrl {
    fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Err(err) = web_sys::Url::revoke_object_url(&self.url) {
            tracing::warn!(?err, url = %self.url, "could not revoke preview url");
        }
        tracing::debug!(url = %self.url, "preview url released");
    }
}
