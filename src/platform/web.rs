//! Browser frame clock

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::game::FrameClock;

/// Slot for the frame callback, filled once the game it drives exists
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Schedules ticks with `requestAnimationFrame`
pub struct RafClock {
    callback: FrameCallback,
}

impl RafClock {
    pub fn new(callback: FrameCallback) -> Self {
        Self { callback }
    }
}

impl FrameClock for RafClock {
    fn request_tick(&mut self) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; cannot schedule frame");
            return;
        };
        match self.callback.borrow().as_ref() {
            Some(cb) => {
                if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                }
            }
            None => log::warn!("Frame requested before callback was installed"),
        }
    }
}
