/// Platform-agnostic input handling for the badge
use glam::DVec2;
use tracing::debug;

/// Platform-independent input events, queued between animation frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    // Pointer events (client coordinates, px)
    DragStart { x: f64, y: f64 },
    DragMove { x: f64, y: f64 },
    /// Pointer up or pointer cancel
    DragEnd,

    // Page events
    /// Absolute vertical scroll offset
    Scroll { y: f64 },
}

/// Pointer and pivot positions for one dragged frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    pub pivot: DVec2,
    pub pointer: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drag {
    /// Nobody holds the badge.
    Released,
    /// Pressed but the pointer has not moved yet; the badge stays put.
    ///
    /// The angle is not taken from the press position, so a grab doesn't
    /// snap the badge to wherever the card was clicked.
    Held,
    /// The badge follows the pointer.
    Follow(DragSample),
}

/// Everything the integrator consumes for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub drag: Drag,
    /// Vertical scroll since the previous frame, px.
    pub scroll_delta: f64,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self {
            drag: Drag::Released,
            scroll_delta: 0.0,
        }
    }

    pub fn follow(pivot: DVec2, pointer: DVec2) -> Self {
        Self {
            drag: Drag::Follow(DragSample { pivot, pointer }),
            scroll_delta: 0.0,
        }
    }

    pub fn scrolled(scroll_delta: f64) -> Self {
        Self {
            drag: Drag::Released,
            scroll_delta,
        }
    }
}

/// Input accumulated since the last frame
pub struct InputState {
    drag_enabled: bool,
    dragging: bool,
    pointer: Option<DVec2>,
    /// Pivot latched on the first frame of the current drag
    drag_pivot: Option<DVec2>,
    last_scroll_y: f64,
    scroll_delta: f64,
}

impl InputState {
    pub fn new(drag_enabled: bool, scroll_y: f64) -> Self {
        Self {
            drag_enabled,
            dragging: false,
            pointer: None,
            drag_pivot: None,
            last_scroll_y: scroll_y,
            scroll_delta: 0.0,
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::DragStart { x, y } => {
                if !self.drag_enabled {
                    return;
                }
                debug!(x, y, "drag start");
                self.dragging = true;
                // Position is picked up on the first move so the badge doesn't snap
                self.pointer = None;
                self.drag_pivot = None;
            }
            InputEvent::DragMove { x, y } => {
                if self.dragging {
                    self.pointer = Some(DVec2::new(x, y));
                }
            }
            InputEvent::DragEnd => {
                if self.dragging {
                    debug!("drag end");
                }
                self.dragging = false;
                self.pointer = None;
                self.drag_pivot = None;
            }
            InputEvent::Scroll { y } => {
                self.scroll_delta += y - self.last_scroll_y;
                self.last_scroll_y = y;
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Snapshot the input for this frame and reset per-frame accumulators.
    ///
    /// `pivot` is only read on the first frame of a drag; it then stays fixed
    /// until release, so a stretching rope can't move it under a still pointer.
    pub fn take_frame(&mut self, pivot: DVec2) -> FrameInput {
        let drag = if self.dragging {
            let pivot = *self.drag_pivot.get_or_insert(pivot);
            match self.pointer {
                None => Drag::Held,
                Some(pointer) => Drag::Follow(DragSample { pivot, pointer }),
            }
        } else {
            Drag::Released
        };
        let scroll_delta = std::mem::take(&mut self.scroll_delta);
        FrameInput { drag, scroll_delta }
    }
}

pub mod wasm {
    use super::*;
    use web_sys::PointerEvent;

    pub fn pointer_down_to_input(e: &PointerEvent) -> InputEvent {
        InputEvent::DragStart {
            x: e.client_x() as f64,
            y: e.client_y() as f64,
        }
    }

    pub fn pointer_move_to_input(e: &PointerEvent) -> InputEvent {
        InputEvent::DragMove {
            x: e.client_x() as f64,
            y: e.client_y() as f64,
        }
    }

    pub fn scroll_to_input(window: &web_sys::Window) -> Option<InputEvent> {
        window.scroll_y().ok().map(|y| InputEvent::Scroll { y })
    }
}
