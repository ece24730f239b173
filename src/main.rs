use dioxus::prelude::*;

mod components;
mod config;
mod error;
mod model;
mod preview;
mod timer;
#[cfg(target_arch = "wasm32")]
mod web;

use components::{Toast, ToastController, ToastHost, UploadPage};
use config::UploadConfig;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const APP_CSS: Asset = asset!("/assets/styling/app.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(UploadConfig::load);
    let toasts = use_signal(Vec::<Toast>::new);

    use_context_provider(|| config.clone());
    use_context_provider(|| ToastController::new(toasts));

    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Meta { name: "theme-color", content: "#059669" }
        document::Title { "رفع تلاوة جديدة" }

        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: APP_CSS }

        UploadPage {}
        ToastHost { duration_ms: config.toast_duration_ms }
    }
}
