use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Event, EventTarget, MouseEvent, VisibilityState, Window};

use crate::frame_loop::Schedule;

use super::dom;
use super::SharedLoop;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle on the self-rescheduling animation-frame callback. Cloned into the
/// focus listeners so they can restart a lapsed loop.
#[derive(Clone)]
pub struct FrameRequester {
    callback: FrameCallback,
}

impl FrameRequester {
    /// Install the frame callback. Each frame asks the loop whether to go on
    /// and only then requests the next one, so a blurred tab simply stops
    /// receiving frames.
    pub fn install(state: SharedLoop) -> Self {
        // `f` holds the animation-frame closure so it can keep calling
        // `request_animation_frame` on itself.
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let schedule = state.borrow_mut().frame();
            match schedule {
                Schedule::Continue => {
                    if let Err(e) = request(&f) {
                        log::error!("requestAnimationFrame failed: {e:?}");
                    }
                }
                Schedule::Stop => log::debug!("frame loop paused"),
            }
        }) as Box<dyn FnMut()>));
        Self { callback: g }
    }

    pub fn request(&self) -> Result<i32, JsValue> {
        request(&self.callback)
    }
}

fn request(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let slot = callback.borrow();
    let closure = slot.as_ref().ok_or("frame callback not installed")?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
fn on<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn resume(state: &SharedLoop, frames: &FrameRequester) {
    if state.borrow_mut().focus() {
        if let Err(e) = frames.request() {
            log::error!("failed to resume frame loop: {e:?}");
        }
    }
}

/// Wire the DOM events that feed the loop.
pub fn listen(
    window: &Window,
    document: &Document,
    state: SharedLoop,
    frames: FrameRequester,
) -> Result<(), JsValue> {
    let resize = {
        let state = state.clone();
        move |_: Event| {
            let Some(window) = web_sys::window() else { return };
            match (dom::inner_width(&window), dom::inner_height(&window)) {
                (Ok(w), Ok(h)) => {
                    state
                        .borrow_mut()
                        .resize(w, h, window.device_pixel_ratio());
                }
                _ => log::warn!("could not read window size"),
            }
        }
    };
    on(window, "resize", resize.clone())?;
    on(window, "orientationchange", resize)?;

    {
        let state = state.clone();
        on(window, "scroll", move |_: Event| {
            let Some(window) = web_sys::window() else { return };
            match window.scroll_y() {
                Ok(y) => {
                    state.borrow_mut().scroll(y as f32);
                }
                Err(e) => log::warn!("scrollY unavailable: {e:?}"),
            }
        })?;
    }

    {
        let state = state.clone();
        let body = document.body();
        on(window, "pointermove", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
            let on_body = match (event.target(), body.as_ref()) {
                (Some(target), Some(body)) => js_sys::Object::is(target.as_ref(), body.as_ref()),
                _ => false,
            };
            state.borrow_mut().pointer(
                event.client_x() as f64,
                event.client_y() as f64,
                on_body,
            );
        })?;
    }

    {
        let state = state.clone();
        on(window, "blur", move |_: Event| state.borrow_mut().blur())?;
    }

    {
        let state = state.clone();
        let frames = frames.clone();
        on(window, "focus", move |_: Event| resume(&state, &frames))?;
    }

    {
        let doc = document.clone();
        on(document, "visibilitychange", move |_: Event| {
            if doc.visibility_state() == VisibilityState::Hidden {
                state.borrow_mut().blur();
            } else {
                resume(&state, &frames);
            }
        })?;
    }

    Ok(())
}
