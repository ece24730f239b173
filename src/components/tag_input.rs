use crate::components::Icon;
use crate::model::{KeyEffect, TagKey, TagSet, DEFAULT_MAX_TAGS};
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

#[cfg(target_arch = "wasm32")]
use crate::web::{element_by_id, event_within, focus_leaves, ScopedListener};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};

const DEFAULT_PLACEHOLDER: &str = "أضف وسوماً...";

/// Props as of the last render, for listeners registered once at mount.
struct LatestTags {
    tags: TagSet,
    onchange: EventHandler<Vec<String>>,
}

fn tag_key(evt: &KeyboardEvent) -> TagKey {
    match evt.key() {
        Key::Enter => TagKey::Enter,
        Key::Backspace => TagKey::Backspace,
        Key::Character(text) if text == "," => TagKey::Comma,
        _ => TagKey::Other,
    }
}

/// Run an edit against the current tags and draft, then publish whatever changed.
fn apply_edit<R>(
    latest: &RefCell<LatestTags>,
    mut draft: Signal<String>,
    edit: impl FnOnce(&mut TagSet, &mut String) -> R,
) -> R {
    let (onchange, before) = {
        let latest = latest.borrow();
        (latest.onchange, latest.tags.clone())
    };
    let mut tags = before.clone();
    let mut text = draft.peek().clone();
    let result = edit(&mut tags, &mut text);

    if *draft.peek() != text {
        draft.set(text);
    }
    if tags != before {
        latest.borrow_mut().tags = tags.clone();
        onchange.call(tags.into_tags());
    }
    result
}

#[component]
pub fn TagInput(
    value: Vec<String>,
    onchange: EventHandler<Vec<String>>,
    #[props(default = DEFAULT_PLACEHOLDER.to_string())] placeholder: String,
    #[props(default = DEFAULT_MAX_TAGS)] max_tags: usize,
    #[props(default)] class: String,
) -> Element {
    let container_id = use_hook(|| format!("tag-input-{}", Uuid::new_v4()));
    let mut draft = use_signal(String::new);
    let mut input_node = use_signal(|| None::<Rc<MountedData>>);

    let tag_set = TagSet::from_tags(value.iter().cloned(), max_tags);
    let latest = use_hook(|| {
        Rc::new(RefCell::new(LatestTags {
            tags: tag_set.clone(),
            onchange,
        }))
    });
    *latest.borrow_mut() = LatestTags {
        tags: tag_set.clone(),
        onchange,
    };

    // Pressing outside the editor, or moving focus out of it, commits pending text.
    #[cfg(target_arch = "wasm32")]
    {
        let listeners = use_hook(|| Rc::new(RefCell::new(Vec::<ScopedListener>::new())));
        {
            let container_id = container_id.clone();
            let latest = latest.clone();
            let listeners = listeners.clone();
            use_effect(move || subscribe_commit_on_leave(&container_id, &latest, draft, &listeners));
        }
        use_drop(move || listeners.borrow_mut().clear());
    }

    let on_keydown = {
        let latest = latest.clone();
        move |evt: KeyboardEvent| {
            let key = tag_key(&evt);
            if key == TagKey::Other {
                return;
            }
            let effect = apply_edit(&latest, draft, |tags, text| tags.handle_key(text, key));
            if effect == KeyEffect::Suppress {
                evt.prevent_default();
            }
        }
    };

    let focus_input = move |_| {
        if let Some(node) = input_node() {
            spawn(async move {
                let _ = node.set_focus(true).await;
            });
        }
    };

    let shown_placeholder = if tag_set.is_empty() {
        placeholder.clone()
    } else {
        String::new()
    };
    let is_full = tag_set.is_full();

    rsx! {
        div {
            id: "{container_id}",
            class: "flex flex-wrap items-center gap-2 p-2 min-h-10 rounded-md border border-zinc-300 bg-white text-sm focus-within:ring-2 focus-within:ring-emerald-500 focus-within:ring-offset-2 {class}",
            onclick: focus_input,
            for tag in tag_set.tags().iter().cloned() {
                span {
                    key: "{tag}",
                    class: "inline-flex items-center gap-1 px-3 py-1 rounded-full text-xs bg-emerald-100 text-emerald-900 animate-scale-in",
                    "{tag}"
                    button {
                        r#type: "button",
                        class: "rounded-full p-0.5 hover:bg-emerald-900/10 transition-colors",
                        "aria-label": "Remove {tag}",
                        onclick: {
                            let latest = latest.clone();
                            let tag = tag.clone();
                            move |evt: MouseEvent| {
                                evt.stop_propagation();
                                apply_edit(&latest, draft, |tags, _| tags.remove(&tag));
                            }
                        },
                        Icon { name: "x".to_string(), class: "w-3.5 h-3.5".to_string() }
                    }
                }
            }
            input {
                value: "{draft}",
                dir: "rtl",
                placeholder: "{shown_placeholder}",
                disabled: is_full,
                class: "flex-1 bg-transparent outline-none placeholder:text-zinc-400 min-w-[120px] text-right",
                oninput: move |evt: FormEvent| draft.set(evt.value()),
                onkeydown: on_keydown,
                onmounted: move |evt: MountedEvent| input_node.set(Some(evt.data())),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn subscribe_commit_on_leave(
    container_id: &str,
    latest: &Rc<RefCell<LatestTags>>,
    draft: Signal<String>,
    listeners: &RefCell<Vec<ScopedListener>>,
) {
    let runtime = Runtime::current();
    let mut subscriptions = listeners.borrow_mut();
    subscriptions.clear();

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        let container_id = container_id.to_string();
        let latest = latest.clone();
        let runtime = runtime.clone();
        subscriptions.extend(ScopedListener::attach(&document, "mousedown", move |event| {
            if event_within(&event, &container_id) {
                return;
            }
            let _guard = RuntimeGuard::new(runtime.clone());
            apply_edit(&latest, draft, |tags, text| tags.commit_on_blur(text));
        }));
    }

    // Keyboard navigation never produces a mousedown. Focus moving between the
    // draft and a chip's remove button stays inside and is ignored.
    let Some(container) = element_by_id::<web_sys::HtmlElement>(container_id) else {
        tracing::warn!(container_id, "tag editor container missing, focus commit disabled");
        return;
    };
    let container_id = container_id.to_string();
    let latest = latest.clone();
    subscriptions.extend(ScopedListener::attach(&container, "focusout", move |event| {
        if !focus_leaves(&event, &container_id) {
            return;
        }
        let _guard = RuntimeGuard::new(runtime.clone());
        apply_edit(&latest, draft, |tags, text| tags.commit_on_blur(text));
    }));
}
