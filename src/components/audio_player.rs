//! Inline preview player for the selected recitation.
//!
//! The element's `timeupdate`, `loadedmetadata` and `ended` events are wired
//! through `ScopedListener`s held in hook state, so unmounting the player
//! detaches them. Transport commands go straight to the element found by id.
use crate::components::Icon;
use crate::model::{track_fraction, PlaybackState, TransportCommand};
use dioxus::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

#[cfg(target_arch = "wasm32")]
use crate::web::{element_by_id, ScopedListener};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use web_sys::{Event as DomEvent, HtmlAudioElement};

const WAVE_BARS: usize = 5;

#[component]
pub fn AudioPlayer(src: String, #[props(default)] class: String) -> Element {
    let element_id = use_hook(|| format!("recitation-audio-{}", Uuid::new_v4()));
    let mut playback = use_signal(PlaybackState::default);
    let mut track = use_signal(|| None::<Rc<MountedData>>);
    let effective_volume = use_memo(move || playback.read().effective_volume());

    #[cfg(target_arch = "wasm32")]
    {
        let listeners = use_hook(|| Rc::new(RefCell::new(Vec::<ScopedListener>::new())));
        {
            let element_id = element_id.clone();
            let listeners = listeners.clone();
            use_effect(move || subscribe_media_events(&element_id, playback, &listeners));
        }
        use_drop(move || listeners.borrow_mut().clear());
    }

    // The element caches its previous source, so every new src needs an explicit load.
    {
        let element_id = element_id.clone();
        let src = src.clone();
        use_effect(use_reactive!(|(src,)| {
            playback.with_mut(|state| state.load_source());
            if src.is_empty() {
                return;
            }
            load_element(&element_id);
        }));
    }

    {
        let element_id = element_id.clone();
        use_effect(move || apply_volume(&element_id, effective_volume()));
    }

    let on_toggle_play = {
        let element_id = element_id.clone();
        let has_source = !src.is_empty();
        move |_| {
            if !has_source {
                return;
            }
            let command = playback.with_mut(|state| state.toggle_play());
            issue_transport(&element_id, command, playback);
        }
    };

    let on_track_click = {
        let element_id = element_id.clone();
        move |evt: MouseEvent| {
            let click_x = evt.client_coordinates().x;
            let Some(node) = track() else {
                return;
            };
            let element_id = element_id.clone();
            spawn(async move {
                let fraction = match node.get_client_rect().await {
                    Ok(rect) => track_fraction(click_x, rect.origin.x, rect.size.width),
                    Err(_) => 0.0,
                };
                let time = playback.with_mut(|state| state.seek(fraction));
                seek_element(&element_id, time);
            });
        }
    };

    let on_volume_change = move |evt: FormEvent| {
        if let Ok(value) = evt.value().parse::<f64>() {
            playback.with_mut(|state| state.set_volume(value / 100.0));
        }
    };

    let state = playback.read().clone();
    let percent = state.progress_percent();
    let play_label = if state.is_playing { "Pause" } else { "Play" };
    let mute_label = if state.is_muted { "Unmute" } else { "Mute" };
    let volume_percent = (state.volume * 100.0).round() as i32;
    let elapsed = state.elapsed_label();
    let total = state.duration_label();

    rsx! {
        div {
            class: "relative rounded-xl p-4 bg-zinc-100/70 backdrop-blur-sm transition-all duration-300 {class}",
            dir: "ltr",
            audio { id: "{element_id}", preload: "metadata",
                source { src: "{src}", r#type: "audio/mp3" }
                "Your browser does not support the audio element."
            }

            div { class: "flex items-center gap-3",
                button {
                    r#type: "button",
                    class: "flex items-center justify-center w-9 h-9 rounded-full bg-emerald-600 text-white shadow-md hover:bg-emerald-500 transition-all",
                    "aria-label": "{play_label}",
                    onclick: on_toggle_play,
                    if state.is_playing {
                        Icon { name: "pause".to_string(), class: "w-4 h-4".to_string() }
                    } else {
                        Icon { name: "play".to_string(), class: "w-4 h-4 ml-0.5".to_string() }
                    }
                }

                div { class: "audio-waveform flex-1",
                    for i in 1..=WAVE_BARS {
                        div {
                            key: "{i}",
                            class: if state.is_playing { format!("bar h-4 origin-bottom transition-all duration-500 animate-wave-{i}") } else { "bar h-2 origin-bottom transition-all duration-500".to_string() },
                        }
                    }
                }

                button {
                    r#type: "button",
                    class: "w-8 h-8 flex items-center justify-center text-zinc-500 hover:text-zinc-900 transition-colors",
                    "aria-label": "{mute_label}",
                    onclick: move |_| playback.with_mut(|state| state.toggle_mute()),
                    if state.is_muted {
                        Icon { name: "volume-x".to_string(), class: "w-4 h-4".to_string() }
                    } else {
                        Icon { name: "volume".to_string(), class: "w-4 h-4".to_string() }
                    }
                }
                input {
                    r#type: "range",
                    min: "0",
                    max: "100",
                    value: volume_percent,
                    "aria-label": "Volume",
                    class: "w-20 h-1.5 rounded-full appearance-none cursor-pointer accent-emerald-600",
                    oninput: on_volume_change,
                }
            }

            div { class: "mt-3",
                div {
                    class: "w-full h-1.5 bg-zinc-200 rounded-full overflow-hidden cursor-pointer",
                    onmounted: move |evt: MountedEvent| track.set(Some(evt.data())),
                    onclick: on_track_click,
                    div {
                        class: "h-full bg-emerald-600 rounded-full transition-all",
                        style: "width: {percent}%",
                    }
                }
                div { class: "flex justify-between mt-1 text-xs text-zinc-500",
                    span { "{elapsed}" }
                    span { "{total}" }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn subscribe_media_events(
    element_id: &str,
    mut playback: Signal<PlaybackState>,
    listeners: &RefCell<Vec<ScopedListener>>,
) {
    let Some(audio) = element_by_id::<HtmlAudioElement>(element_id) else {
        tracing::warn!(element_id, "audio element missing, preview transport stays idle");
        return;
    };
    let runtime = Runtime::current();

    let on_time_update = {
        let audio = audio.clone();
        let runtime = runtime.clone();
        move |_: DomEvent| {
            let _guard = RuntimeGuard::new(runtime.clone());
            let time = audio.current_time();
            playback.with_mut(|state| state.on_time_update(time));
        }
    };
    let on_metadata = {
        let audio = audio.clone();
        let runtime = runtime.clone();
        move |_: DomEvent| {
            let _guard = RuntimeGuard::new(runtime.clone());
            let duration = audio.duration();
            playback.with_mut(|state| state.on_metadata(duration));
        }
    };
    let on_ended = {
        let audio = audio.clone();
        move |_: DomEvent| {
            let _guard = RuntimeGuard::new(runtime.clone());
            audio.set_current_time(0.0);
            playback.with_mut(|state| state.on_ended());
        }
    };

    let mut subscriptions = listeners.borrow_mut();
    subscriptions.clear();
    subscriptions.extend(ScopedListener::attach(&audio, "timeupdate", on_time_update));
    subscriptions.extend(ScopedListener::attach(&audio, "loadedmetadata", on_metadata));
    subscriptions.extend(ScopedListener::attach(&audio, "ended", on_ended));
}

#[cfg(target_arch = "wasm32")]
fn load_element(element_id: &str) {
    if let Some(audio) = element_by_id::<HtmlAudioElement>(element_id) {
        audio.load();
        tracing::debug!(element_id, "preview source reloaded");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_element(_element_id: &str) {}

#[cfg(target_arch = "wasm32")]
fn apply_volume(element_id: &str, volume: f64) {
    if let Some(audio) = element_by_id::<HtmlAudioElement>(element_id) {
        audio.set_volume(volume);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_volume(_element_id: &str, _volume: f64) {}

#[cfg(target_arch = "wasm32")]
fn seek_element(element_id: &str, time: f64) {
    if let Some(audio) = element_by_id::<HtmlAudioElement>(element_id) {
        audio.set_current_time(time);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn seek_element(_element_id: &str, _time: f64) {}

#[cfg(target_arch = "wasm32")]
fn issue_transport(
    element_id: &str,
    command: TransportCommand,
    mut playback: Signal<PlaybackState>,
) {
    let Some(audio) = element_by_id::<HtmlAudioElement>(element_id) else {
        playback.with_mut(|state| state.play_rejected());
        return;
    };
    match command {
        TransportCommand::Pause => {
            if let Err(err) = audio.pause() {
                tracing::warn!(?err, "pause failed");
            }
        }
        TransportCommand::Play => match audio.play() {
            Ok(promise) => {
                spawn(async move {
                    if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        tracing::warn!(?err, "play request rejected");
                        playback.with_mut(|state| state.play_rejected());
                    }
                });
            }
            Err(err) => {
                tracing::warn!(?err, "play request failed");
                playback.with_mut(|state| state.play_rejected());
            }
        },
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn issue_transport(
    _element_id: &str,
    command: TransportCommand,
    mut playback: Signal<PlaybackState>,
) {
    // No media element outside the browser; undo the optimistic flip.
    if command == TransportCommand::Play {
        playback.with_mut(|state| state.play_rejected());
    }
}
