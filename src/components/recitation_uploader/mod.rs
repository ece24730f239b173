use crate::components::{Toast, ToastController};
use crate::config::UploadConfig;
use crate::model::{TickOutcome, UploadForm};
use crate::preview::ObjectUrl;
use crate::timer::sleep_ms;
use dioxus::core::Task;
use dioxus::prelude::*;
use uuid::Uuid;

mod details;
mod file_panel;

use details::DetailsCard;
use file_panel::FilePanel;

/// Form state shared by the uploader's panels through context.
pub type RecitationForm = Signal<UploadForm<ObjectUrl>>;

#[component]
pub fn RecitationUploader(#[props(default)] class: String) -> Element {
    let config = use_context::<UploadConfig>();
    let toasts = use_context::<ToastController>();
    let form: RecitationForm = use_signal(UploadForm::default);
    let ticker = use_signal(|| None::<Task>);
    let input_id = use_hook(|| format!("recitation-file-{}", Uuid::new_v4()));

    use_context_provider(|| form);

    let on_upload = {
        let config = config.clone();
        let input_id = input_id.clone();
        move |_| start_upload(form, ticker, toasts, &config, input_id.clone())
    };

    rsx! {
        div { class: "max-w-4xl mx-auto p-6 {class}",
            div { class: "mb-6 text-center animate-fade-in-up",
                h1 { class: "text-3xl font-bold mb-2", "رفع تلاوة جديدة" }
                p { class: "text-zinc-500", "قم برفع تلاوتك وشاركها مع المجتمع" }
            }

            div { class: "grid grid-cols-1 md:grid-cols-3 gap-8",
                div { class: "md:col-span-1 animate-slide-in",
                    FilePanel { input_id: input_id.clone() }
                }
                div { class: "md:col-span-2 animate-fade-in-up",
                    DetailsCard { max_tags: config.max_tags, on_upload }
                }
            }
        }
    }
}

/// Kick off the simulated upload: a progress ticker and an independent
/// completion timer, followed by a delayed reset. Both tasks live in this
/// component's scope and die with it.
fn start_upload(
    mut form: RecitationForm,
    mut ticker: Signal<Option<Task>>,
    mut toasts: ToastController,
    config: &UploadConfig,
    input_id: String,
) {
    let Some(generation) = form.with_mut(|form| form.begin_upload()) else {
        return;
    };
    tracing::info!(generation, "simulated upload started");

    let step = config.progress_step;
    let interval_ms = config.progress_interval_ms;
    let upload_delay_ms = config.upload_delay_ms;
    let reset_delay_ms = config.reset_delay_ms;

    if let Some(previous) = ticker.write().take() {
        previous.cancel();
    }
    let progress_task = spawn(async move {
        loop {
            sleep_ms(interval_ms).await;
            if form.with_mut(|form| form.tick_progress(generation, step)) != TickOutcome::Advanced {
                break;
            }
        }
    });
    ticker.set(Some(progress_task));

    spawn(async move {
        sleep_ms(upload_delay_ms).await;
        if !form.with_mut(|form| form.complete_upload(generation)) {
            return;
        }
        if let Some(task) = ticker.write().take() {
            task.cancel();
        }
        tracing::info!(generation, "simulated upload complete");
        toasts.push(Toast::success(
            "تم رفع التلاوة بنجاح!",
            "يمكنك الآن الاستماع للتلاوة من صفحة التلاوات",
        ));

        sleep_ms(reset_delay_ms).await;
        if form.with_mut(|form| form.reset_after(generation)) {
            reset_file_input(&input_id);
            tracing::info!(generation, "upload form reset");
        }
    });
}

#[cfg(target_arch = "wasm32")]
fn reset_file_input(input_id: &str) {
    crate::web::clear_file_input(input_id);
}

#[cfg(not(target_arch = "wasm32"))]
fn reset_file_input(_input_id: &str) {}
