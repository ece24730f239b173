use crate::components::RecitationUploader;
use dioxus::prelude::*;

/// The single page of the app: a soft backdrop around the uploader.
#[component]
pub fn UploadPage() -> Element {
    rsx! {
        div { class: "min-h-screen bg-gradient-to-b from-white to-zinc-100", dir: "rtl",
            div { class: "container max-w-6xl mx-auto py-12 px-4 sm:px-6 animate-fade-in",
                RecitationUploader {}
            }
        }
    }
}
