use super::RecitationForm;
use crate::components::{AudioPlayer, Icon, ToastController};
use crate::config::{UploadConfig, MIB};
use dioxus::prelude::*;
use uuid::Uuid;

#[cfg(target_arch = "wasm32")]
use crate::components::Toast;
#[cfg(target_arch = "wasm32")]
use crate::model::upload::FileMeta;
#[cfg(target_arch = "wasm32")]
use crate::preview::ObjectUrl;
#[cfg(target_arch = "wasm32")]
use crate::web::{click_element, element_by_id, first_input_file, ScopedListener};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{DragEvent, Event as DomEvent, HtmlElement};

/// Drop zone, selected-file preview and upload progress.
#[component]
pub(super) fn FilePanel(input_id: String) -> Element {
    let mut form = use_context::<RecitationForm>();
    let config = use_context::<UploadConfig>();
    let toasts = use_context::<ToastController>();
    let drag_active = use_signal(|| false);
    let zone_id = use_hook(|| format!("recitation-drop-{}", Uuid::new_v4()));

    #[cfg(target_arch = "wasm32")]
    {
        let listeners = use_hook(|| Rc::new(RefCell::new(Vec::<ScopedListener>::new())));
        {
            let zone_id = zone_id.clone();
            let config = config.clone();
            let listeners = listeners.clone();
            use_effect(move || {
                subscribe_drop_zone(&zone_id, &config, form, toasts, drag_active, &listeners)
            });
        }
        use_drop(move || listeners.borrow_mut().clear());
    }

    let on_pick = {
        let input_id = input_id.clone();
        move |_| open_picker(&input_id)
    };

    let on_file_change = {
        let input_id = input_id.clone();
        let config = config.clone();
        move |_: FormEvent| accept_from_input(&input_id, &config, form, toasts)
    };

    let on_clear = {
        let input_id = input_id.clone();
        move |_| {
            if form.with_mut(|form| form.clear_file()) {
                tracing::info!("recitation file cleared");
                reset_input(&input_id);
            }
        }
    };

    let (file_name, preview_url, can_change, uploading, complete, progress) = {
        let form = form.read();
        (
            form.file().map(|file| file.meta.name.clone()),
            form.preview_url().map(str::to_string),
            form.accepts_file_changes(),
            form.is_uploading(),
            form.is_complete(),
            form.progress(),
        )
    };
    let max_mib = config.max_file_size_bytes / MIB;

    rsx! {
        div { class: "h-full rounded-xl border border-zinc-200 bg-white shadow-sm",
            div { class: "p-6 flex flex-col h-full",
                div {
                    id: "{zone_id}",
                    class: if drag_active() { "border-2 border-dashed rounded-xl p-8 flex flex-col items-center justify-center transition-all mb-4 border-emerald-500 bg-emerald-50" } else { "border-2 border-dashed rounded-xl p-8 flex flex-col items-center justify-center transition-all mb-4 border-zinc-200" },
                    input {
                        id: "{input_id}",
                        r#type: "file",
                        accept: ".mp3,audio/mpeg",
                        class: "hidden",
                        onchange: on_file_change,
                    }
                    {
                        match file_name {
                            None => rsx! {
                                div { class: "w-16 h-16 rounded-full bg-emerald-100 flex items-center justify-center mb-4",
                                    Icon {
                                        name: "upload-cloud".to_string(),
                                        class: "w-8 h-8 text-emerald-600".to_string(),
                                    }
                                }
                                p { class: "text-center mb-2", "اسحب ملف التلاوة هنا" }
                                p { class: "text-xs text-zinc-500 text-center mb-4", "أو" }
                                button {
                                    r#type: "button",
                                    class: "px-3 py-1.5 rounded-md border border-zinc-300 text-sm hover:bg-zinc-50 transition-colors",
                                    onclick: on_pick,
                                    "اختر ملفاً"
                                }
                                p { class: "text-xs text-zinc-500 mt-4",
                                    "يجب أن يكون الملف بصيغة MP3، بحجم أقصى {max_mib} ميجابايت"
                                }
                            },
                            Some(name) => rsx! {
                                div { class: "w-full",
                                    div { class: "flex items-center mb-4",
                                        Icon {
                                            name: "file-audio".to_string(),
                                            class: "w-6 h-6 text-emerald-600 ml-2".to_string(),
                                        }
                                        div { class: "flex-1 truncate", "{name}" }
                                        button {
                                            r#type: "button",
                                            class: "p-1 rounded-full hover:bg-zinc-100 transition-colors disabled:opacity-40",
                                            disabled: !can_change,
                                            "aria-label": "Remove file",
                                            onclick: on_clear,
                                            Icon { name: "x".to_string(), class: "w-4 h-4".to_string() }
                                        }
                                    }
                                    if let Some(url) = preview_url {
                                        AudioPlayer { src: url.clone() }
                                    }
                                }
                            },
                        }
                    }
                }

                if uploading {
                    div { class: "mt-auto pt-4",
                        div { class: "flex justify-between text-sm mb-1",
                            span { "جاري الرفع..." }
                            span { "{progress}%" }
                        }
                        div { class: "w-full h-2 bg-zinc-100 rounded-full overflow-hidden",
                            div {
                                class: "h-full bg-emerald-600 transition-all duration-300",
                                style: "width: {progress}%",
                            }
                        }
                    }
                }

                if complete {
                    div { class: "flex items-center justify-center text-emerald-600 mt-auto pt-4",
                        Icon { name: "check".to_string(), class: "w-4 h-4 ml-2".to_string() }
                        span { "تم الرفع بنجاح!" }
                    }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn open_picker(input_id: &str) {
    click_element(input_id);
}

#[cfg(not(target_arch = "wasm32"))]
fn open_picker(_input_id: &str) {
    tracing::debug!("file picking is only available in the browser");
}

#[cfg(target_arch = "wasm32")]
fn reset_input(input_id: &str) {
    crate::web::clear_file_input(input_id);
}

#[cfg(not(target_arch = "wasm32"))]
fn reset_input(_input_id: &str) {}

#[cfg(target_arch = "wasm32")]
fn accept_from_input(
    input_id: &str,
    config: &UploadConfig,
    form: RecitationForm,
    toasts: ToastController,
) {
    if let Some(file) = first_input_file(input_id) {
        accept_browser_file(&file, config, form, toasts);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn accept_from_input(
    _input_id: &str,
    _config: &UploadConfig,
    _form: RecitationForm,
    _toasts: ToastController,
) {
}

/// Validate a browser `File` and adopt it, or surface the rejection as a toast.
#[cfg(target_arch = "wasm32")]
fn accept_browser_file(
    file: &web_sys::File,
    config: &UploadConfig,
    mut form: RecitationForm,
    mut toasts: ToastController,
) {
    let meta = FileMeta {
        name: file.name(),
        size: file.size().max(0.0) as u64,
        mime: file.type_(),
    };
    let result =
        form.with_mut(|form| form.select_file(meta, || ObjectUrl::for_file(file), config));
    if let Err(err) = result {
        tracing::warn!(%err, "recitation file rejected");
        toasts.push(Toast::error(err.title(), err.description()));
    }
}

#[cfg(target_arch = "wasm32")]
fn subscribe_drop_zone(
    zone_id: &str,
    config: &UploadConfig,
    form: RecitationForm,
    toasts: ToastController,
    drag_active: Signal<bool>,
    listeners: &RefCell<Vec<ScopedListener>>,
) {
    let Some(zone) = element_by_id::<HtmlElement>(zone_id) else {
        tracing::warn!(zone_id, "drop zone missing, drag and drop disabled");
        return;
    };
    let runtime = Runtime::current();
    let mut subscriptions = listeners.borrow_mut();
    subscriptions.clear();

    for event in ["dragenter", "dragover"] {
        let runtime = runtime.clone();
        let mut drag_active = drag_active;
        subscriptions.extend(ScopedListener::attach(&zone, event, move |evt: DomEvent| {
            evt.prevent_default();
            evt.stop_propagation();
            let _guard = RuntimeGuard::new(runtime.clone());
            if !*drag_active.peek() {
                drag_active.set(true);
            }
        }));
    }

    {
        let runtime = runtime.clone();
        let mut drag_active = drag_active;
        subscriptions.extend(ScopedListener::attach(&zone, "dragleave", move |evt: DomEvent| {
            evt.prevent_default();
            evt.stop_propagation();
            let _guard = RuntimeGuard::new(runtime.clone());
            drag_active.set(false);
        }));
    }

    let config = config.clone();
    let mut drag_active = drag_active;
    subscriptions.extend(ScopedListener::attach(&zone, "drop", move |evt: DomEvent| {
        evt.prevent_default();
        evt.stop_propagation();
        let _guard = RuntimeGuard::new(runtime.clone());
        drag_active.set(false);
        let file = evt
            .dyn_ref::<DragEvent>()
            .and_then(DragEvent::data_transfer)
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            accept_browser_file(&file, &config, form, toasts);
        }
    }));
}
