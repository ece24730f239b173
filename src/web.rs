//! Browser-only helpers: element lookup and listeners that detach themselves.
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Event, EventTarget};

pub fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    let document = window()?.document()?;
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// A DOM event listener registered for as long as this value lives.
pub struct ScopedListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl ScopedListener {
    pub fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        if let Err(err) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event, ?err, "failed to attach listener");
            return None;
        }
        tracing::debug!(event, "listener attached");
        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for ScopedListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event = self.event, ?err, "failed to detach listener");
            return;
        }
        tracing::debug!(event = self.event, "listener detached");
    }
}

/// First file currently held by an `<input type="file">`.
pub fn first_input_file(input_id: &str) -> Option<web_sys::File> {
    let input = element_by_id::<web_sys::HtmlInputElement>(input_id)?;
    input.files()?.get(0)
}

/// Reset a file input so picking the same file again fires `change`.
pub fn clear_file_input(input_id: &str) {
    if let Some(input) = element_by_id::<web_sys::HtmlInputElement>(input_id) {
        input.set_value("");
    }
}

pub fn click_element(id: &str) {
    if let Some(element) = element_by_id::<web_sys::HtmlElement>(id) {
        element.click();
    }
}

fn target_within(target: Option<EventTarget>, container_id: &str) -> bool {
    let Some(container) = element_by_id::<web_sys::Node>(container_id) else {
        return false;
    };
    let Some(node) = target.and_then(|target| target.dyn_into::<web_sys::Node>().ok()) else {
        return false;
    };
    container.contains(Some(&node))
}

/// Whether `event` originated inside the element with `container_id`.
pub fn event_within(event: &Event, container_id: &str) -> bool {
    target_within(event.target(), container_id)
}

/// For a `focusout`, whether focus is moving somewhere outside `container_id`
/// (including nowhere, e.g. the window losing focus).
pub fn focus_leaves(event: &Event, container_id: &str) -> bool {
    let next = event
        .dyn_ref::<web_sys::FocusEvent>()
        .and_then(web_sys::FocusEvent::related_target);
    !target_within(next, container_id)
}
