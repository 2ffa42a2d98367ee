// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod config;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::{ConfigError, PendulumConfig};
pub use controller::BadgeController;
pub use model::{PendulumState, RenderParams};

/// Element id the badge attaches to on page load.
pub const DEFAULT_ELEMENT_ID: &str = "hangBadge";
/// Attribute on the badge element holding a JSON config override.
pub const CONFIG_ATTRIBUTE: &str = "data-pendulum";

#[cfg(target_arch = "wasm32")]
pub use web::{attach_badge, attach_badge_with_config, start};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{AddEventListenerOptions, Event, HtmlElement, PointerEvent, Window};

    use super::{logging, DEFAULT_ELEMENT_ID, CONFIG_ATTRIBUTE};
    use crate::config::PendulumConfig;
    use crate::controller::input::{wasm as input_wasm, InputEvent};
    use crate::controller::{BadgeController, FrameLoopContext};
    use crate::view::BadgeElements;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        logging::init();

        let window = web_sys::window().ok_or_else(|| js_error("no global `window`"))?;
        let document = window.document().ok_or_else(|| js_error("no document on window"))?;
        if document.get_element_by_id(DEFAULT_ELEMENT_ID).is_none() {
            tracing::debug!(id = DEFAULT_ELEMENT_ID, "no hanging badge on this page");
            return Ok(());
        }
        attach_badge(DEFAULT_ELEMENT_ID)
    }

    /// Attach to `element_id`, reading overrides from its `data-pendulum` attribute.
    #[wasm_bindgen]
    pub fn attach_badge(element_id: &str) -> Result<(), JsValue> {
        logging::init();
        let (window, root) = find_root(element_id)?;

        let config = match root.get_attribute(CONFIG_ATTRIBUTE) {
            Some(json) => PendulumConfig::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(id = element_id, error = %e, "ignoring badge config attribute");
                PendulumConfig::default()
            }),
            None => PendulumConfig::default(),
        };
        setup_badge(&window, root, config)
    }

    #[wasm_bindgen]
    pub fn attach_badge_with_config(element_id: &str, config_json: &str) -> Result<(), JsValue> {
        logging::init();
        let config = PendulumConfig::from_json(config_json).map_err(|e| js_error(e.to_string()))?;
        let (window, root) = find_root(element_id)?;
        setup_badge(&window, root, config)
    }

    fn find_root(element_id: &str) -> Result<(Window, HtmlElement), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("no global `window`"))?;
        let document = window.document().ok_or_else(|| js_error("no document on window"))?;
        let root = document
            .get_element_by_id(element_id)
            .ok_or_else(|| js_error(format!("no element with id `{element_id}`")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| js_error(format!("`{element_id}` is not an HTML element")))?;
        Ok((window, root))
    }

    fn setup_badge(window: &Window, root: HtmlElement, config: PendulumConfig) -> Result<(), JsValue> {
        let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;

        let controller = Rc::new(RefCell::new(BadgeController::new(config, now, scroll_y, seed)));
        let elements = BadgeElements::new(root.clone())?;

        setup_input_listeners(window, &root, controller.clone())?;

        let mut frame_ctx = FrameLoopContext::new(controller, elements);
        FrameCallback::new(window.clone(), move |now| frame_ctx.update(now)).start()?;

        tracing::info!(id = %root.id(), "hanging badge attached");
        Ok(())
    }

    /// Pointer and scroll listeners only queue input; the frame loop consumes it
    fn setup_input_listeners(
        window: &Window,
        root: &HtmlElement,
        controller: Rc<RefCell<BadgeController>>,
    ) -> Result<(), JsValue> {
        // Pointer down on the badge starts a drag
        {
            let controller = controller.clone();
            let down = Closure::wrap(Box::new(move |e: PointerEvent| {
                e.prevent_default();
                controller.borrow_mut().handle(&input_wasm::pointer_down_to_input(&e));
            }) as Box<dyn FnMut(PointerEvent)>);
            root.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref())?;
            down.forget();
        }

        // Pointer move anywhere on the page
        {
            let controller = controller.clone();
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let moved = Closure::wrap(Box::new(move |e: PointerEvent| {
                controller.borrow_mut().handle(&input_wasm::pointer_move_to_input(&e));
            }) as Box<dyn FnMut(PointerEvent)>);
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "pointermove",
                moved.as_ref().unchecked_ref(),
                &options,
            )?;
            moved.forget();
        }

        // Pointer up / cancel release the badge
        for kind in ["pointerup", "pointercancel"] {
            let controller = controller.clone();
            let release = Closure::wrap(Box::new(move |_e: Event| {
                controller.borrow_mut().handle(&InputEvent::DragEnd);
            }) as Box<dyn FnMut(Event)>);
            window.add_event_listener_with_callback(kind, release.as_ref().unchecked_ref())?;
            release.forget();
        }

        // Scroll
        {
            let window_for_scroll = window.clone();
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            let scroll = Closure::wrap(Box::new(move |_e: Event| {
                if let Some(event) = input_wasm::scroll_to_input(&window_for_scroll) {
                    controller.borrow_mut().handle(&event);
                }
            }) as Box<dyn FnMut(Event)>);
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                scroll.as_ref().unchecked_ref(),
                &options,
            )?;
            scroll.forget();
        }

        Ok(())
    }

    fn js_error<E: Into<String>>(msg: E) -> JsValue {
        JsValue::from_str(&msg.into())
    }

    /// Self-rescheduling requestAnimationFrame loop, alive for the page's lifetime
    struct FrameCallback {
        f: Box<dyn FnMut(f64) -> Result<(), JsValue>>,
        window: Window,
    }

    impl FrameCallback {
        fn new(window: Window, f: impl FnMut(f64) -> Result<(), JsValue> + 'static) -> Self {
            Self { f: Box::new(f), window }
        }

        fn start(self) -> Result<(), JsValue> {
            let Self { mut f, window } = self;
            let window_for_loop = window.clone();

            let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
            let callback_clone = callback.clone();

            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
                if let Err(e) = f(now) {
                    tracing::error!(error = ?e, "badge frame failed");
                }

                // Schedule the next frame
                if let Some(cb) = callback_clone.borrow().as_ref() {
                    if let Err(e) = window_for_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        tracing::error!(error = ?e, "requestAnimationFrame failed, badge loop stopped");
                    }
                }
            }) as Box<dyn FnMut(f64)>));

            if let Some(cb) = callback.borrow().as_ref() {
                window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            }

            // Leak the closure to keep it alive
            std::mem::forget(callback);
            Ok(())
        }
    }
}
