use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;

use crate::controller::BadgeController;
use crate::view::{BadgeElements, BadgeStyles};

/// Per-frame update for one attached badge
pub struct FrameLoopContext {
    pub controller: Rc<RefCell<BadgeController>>,
    pub elements: BadgeElements,
    frames: u64,
}

impl FrameLoopContext {
    pub fn new(controller: Rc<RefCell<BadgeController>>, elements: BadgeElements) -> Self {
        Self {
            controller,
            elements,
            frames: 0,
        }
    }

    /// Advance the pendulum to `now` (ms) and write the result to the DOM
    pub fn update(&mut self, now: f64) -> Result<(), JsValue> {
        let anchor = self.elements.anchor();
        let params = self.controller.borrow_mut().frame(now, anchor);
        self.elements.apply(&BadgeStyles::from_params(&params))?;

        self.frames += 1;
        if self.frames == 1 {
            tracing::debug!(rotation = params.rotation_degrees, "first badge frame");
        }
        Ok(())
    }
}
