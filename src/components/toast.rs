use crate::components::Icon;
use crate::timer::sleep_ms;
use dioxus::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Shared handle to the toast stack. Each toast dismisses itself once its card
/// has been on screen for the configured duration.
#[derive(Clone, Copy)]
pub struct ToastController {
    pub toasts: Signal<Vec<Toast>>,
}

impl ToastController {
    pub fn new(toasts: Signal<Vec<Toast>>) -> Self {
        Self { toasts }
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.write().push(toast);
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.toasts.write().retain(|toast| toast.id != id);
    }
}

#[component]
pub fn ToastHost(duration_ms: u32) -> Element {
    let controller = use_context::<ToastController>();
    let toasts = (controller.toasts)();

    rsx! {
        div {
            class: "fixed top-4 left-4 z-[70] flex flex-col gap-2 w-80 max-w-[calc(100vw-2rem)]",
            role: "status",
            for toast in toasts {
                ToastCard { key: "{toast.id}", toast: toast.clone(), duration_ms }
            }
        }
    }
}

#[component]
fn ToastCard(toast: Toast, duration_ms: u32) -> Element {
    let controller = use_context::<ToastController>();
    let id = toast.id;

    use_future(move || {
        let mut controller = controller;
        async move {
            sleep_ms(duration_ms).await;
            controller.dismiss(id);
        }
    });

    let class = match toast.variant {
        ToastVariant::Default => "rounded-lg border border-zinc-200 bg-white px-4 py-3 shadow-lg",
        ToastVariant::Destructive => {
            "rounded-lg border border-rose-500/40 bg-rose-600 px-4 py-3 text-white shadow-lg"
        }
    };

    rsx! {
        div { class: "{class} flex items-start gap-3", dir: "rtl",
            div { class: "flex-1",
                p { class: "text-sm font-semibold", "{toast.title}" }
                p { class: "text-xs opacity-90 mt-1", "{toast.description}" }
            }
            button {
                r#type: "button",
                class: "opacity-70 hover:opacity-100 transition-opacity",
                "aria-label": "Dismiss",
                onclick: move |_| {
                    let mut controller = controller;
                    controller.dismiss(id);
                },
                Icon { name: "x".to_string(), class: "w-4 h-4".to_string() }
            }
        }
    }
}
