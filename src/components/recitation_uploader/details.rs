use super::RecitationForm;
use crate::components::TagInput;
use crate::model::{BackgroundType, RecitationType};
use dioxus::prelude::*;

const INPUT_CLASS: &str = "w-full rounded-md border border-zinc-300 bg-white px-3 py-2 text-sm outline-none focus:ring-2 focus:ring-emerald-500";
const LABEL_CLASS: &str = "block text-sm font-medium";

fn switch_class(on: bool) -> &'static str {
    if on {
        "relative inline-flex h-6 w-11 items-center rounded-full bg-emerald-600 transition-colors"
    } else {
        "relative inline-flex h-6 w-11 items-center rounded-full bg-zinc-300 transition-colors"
    }
}

fn thumb_class(on: bool) -> &'static str {
    if on {
        "inline-block h-5 w-5 rounded-full bg-white shadow transition-transform -translate-x-5"
    } else {
        "inline-block h-5 w-5 rounded-full bg-white shadow transition-transform -translate-x-0.5"
    }
}

/// Title, description, reciter, type, tags, toggles and the submit button.
#[component]
pub(super) fn DetailsCard(max_tags: usize, on_upload: EventHandler<()>) -> Element {
    let mut form = use_context::<RecitationForm>();

    let (title, description, reciter, tags) = {
        let form = form.read();
        (
            form.title.clone(),
            form.description.clone(),
            form.reciter.clone(),
            form.tags.clone(),
        )
    };
    let (recitation_type, background, enable_repeat, show_tafseer) = {
        let form = form.read();
        (
            form.recitation_type,
            form.background,
            form.enable_repeat,
            form.show_tafseer,
        )
    };
    let uploading = form.read().is_uploading();
    let can_submit = form.read().can_begin_upload();

    let recitation_options = RecitationType::ALL.map(|kind| (kind, kind.as_str(), kind.label()));
    let background_options = BackgroundType::ALL.map(|kind| (kind, kind.as_str(), kind.label()));
    let background_value = background.as_str();

    rsx! {
        div { class: "rounded-xl border border-zinc-200 bg-white shadow-sm",
            div { class: "p-6 space-y-6",
                div { class: "space-y-2",
                    label { r#for: "title", class: LABEL_CLASS, "عنوان التلاوة" }
                    input {
                        id: "title",
                        dir: "rtl",
                        class: INPUT_CLASS,
                        value: "{title}",
                        placeholder: "أدخل عنوان التلاوة",
                        oninput: move |evt: FormEvent| form.write().title = evt.value(),
                    }
                }

                div { class: "space-y-2",
                    label { r#for: "description", class: LABEL_CLASS, "وصف التلاوة" }
                    textarea {
                        id: "description",
                        dir: "rtl",
                        class: "{INPUT_CLASS} min-h-[100px]",
                        value: "{description}",
                        placeholder: "أدخل وصفاً مختصراً للتلاوة (اختياري)",
                        oninput: move |evt: FormEvent| form.write().description = evt.value(),
                    }
                }

                div { class: "space-y-2",
                    label { r#for: "reciter", class: LABEL_CLASS, "اسم القارئ" }
                    input {
                        id: "reciter",
                        dir: "rtl",
                        class: INPUT_CLASS,
                        value: "{reciter}",
                        placeholder: "أدخل اسم القارئ",
                        oninput: move |evt: FormEvent| form.write().reciter = evt.value(),
                    }
                }

                div { class: "space-y-2",
                    span { class: LABEL_CLASS, "نوع التلاوة" }
                    div { class: "flex flex-row justify-around", role: "radiogroup",
                        for (kind, value, label) in recitation_options {
                            div { key: "{value}", class: "flex items-center gap-2",
                                input {
                                    r#type: "radio",
                                    id: "{value}",
                                    name: "recitation-type",
                                    value: "{value}",
                                    checked: recitation_type == kind,
                                    class: "accent-emerald-600",
                                    onchange: move |_| form.write().recitation_type = kind,
                                }
                                label { r#for: "{value}", class: "cursor-pointer", "{label}" }
                            }
                        }
                    }
                }

                div { class: "space-y-2",
                    label { r#for: "tags", class: LABEL_CLASS, "الوسوم (Tags)" }
                    TagInput {
                        value: tags,
                        onchange: move |next: Vec<String>| form.write().tags = next,
                        placeholder: "أضف وسوماً مثل: خشوع، تجويد...".to_string(),
                        max_tags,
                    }
                }

                div { class: "grid grid-cols-1 sm:grid-cols-2 gap-4",
                    div { class: "flex items-center justify-between gap-2",
                        label { r#for: "repeat", class: "cursor-pointer", "تفعيل التكرار" }
                        button {
                            id: "repeat",
                            r#type: "button",
                            role: "switch",
                            "aria-checked": "{enable_repeat}",
                            class: switch_class(enable_repeat),
                            onclick: move |_| {
                                let mut form = form.write();
                                form.enable_repeat = !form.enable_repeat;
                            },
                            span { class: thumb_class(enable_repeat) }
                        }
                    }

                    div { class: "flex items-center justify-between gap-2",
                        label { r#for: "tafseer", class: "cursor-pointer", "إظهار التفسير" }
                        button {
                            id: "tafseer",
                            r#type: "button",
                            role: "switch",
                            "aria-checked": "{show_tafseer}",
                            class: switch_class(show_tafseer),
                            onclick: move |_| {
                                let mut form = form.write();
                                form.show_tafseer = !form.show_tafseer;
                            },
                            span { class: thumb_class(show_tafseer) }
                        }
                    }

                    div { class: "sm:col-span-2 space-y-2",
                        label { r#for: "background", class: LABEL_CLASS, "الخلفية المرئية" }
                        select {
                            id: "background",
                            class: INPUT_CLASS,
                            value: "{background_value}",
                            onchange: move |evt: FormEvent| {
                                if let Some(kind) = BackgroundType::parse(&evt.value()) {
                                    form.write().background = kind;
                                }
                            },
                            for (kind, value, label) in background_options {
                                option {
                                    key: "{value}",
                                    value: "{value}",
                                    selected: background == kind,
                                    "{label}"
                                }
                            }
                        }
                    }
                }

                button {
                    r#type: "button",
                    class: "w-full rounded-md bg-emerald-600 px-4 py-2 text-sm font-medium text-white hover:bg-emerald-500 transition-colors disabled:opacity-50 disabled:cursor-not-allowed",
                    disabled: !can_submit,
                    onclick: move |_| on_upload.call(()),
                    if uploading {
                        "جاري الرفع..."
                    } else {
                        "رفع التلاوة"
                    }
                }
            }
        }
    }
}
