//! Pointer driven panel resizing.
//!
//! A gesture starts with a pointer-down on the resize handle. From then on the
//! panel follows the pointer through the global move/up listeners acquired
//! from the [`PointerHub`], until pointer-up (or teardown of the view) releases
//! them again.

use std::{cell::RefCell, rc::Rc};

use tracing::debug;

use crate::config::PanelConfig;

pub const MIN_WIDTH: u32 = 260;
pub const MIN_HEIGHT: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSize {
    pub width: u32,
    pub height: u32,
}

impl PanelSize {
    /// Builds a size, raising either dimension to its minimum if needed.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
        }
    }
}

impl From<PanelConfig> for PanelSize {
    fn from(value: PanelConfig) -> Self {
        PanelSize::new(value.width, value.height)
    }
}

impl Default for PanelSize {
    fn default() -> Self {
        PanelConfig::default().into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub base_width: u32,
    pub base_height: u32,
}

// `f64::max` drops NaN and float to int casts saturate, so malformed input
// ends up on the minimum (or u32::MAX) instead of poisoning the size
fn clamp_dimension(base: u32, delta: f64, min: u32) -> u32 {
    (f64::from(base) + delta).round().max(f64::from(min)) as u32
}

impl ResizeGesture {
    pub fn size_at(&self, x: f64, y: f64) -> PanelSize {
        PanelSize {
            width: clamp_dimension(self.base_width, x - self.anchor_x, MIN_WIDTH),
            height: clamp_dimension(self.base_height, y - self.anchor_y, MIN_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
}

#[derive(Debug, Default)]
struct HubState {
    listeners: Vec<ListenerKind>,
    captured: bool,
}

/// The process wide pointer input stream.
///
/// Keeps track of the global listeners registered on it. At most one capture
/// exists at a time.
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    state: Rc<RefCell<HubState>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn is_captured(&self) -> bool {
        self.state.borrow().captured
    }

    /// Registers the global move and up listeners. Returns `None` if another
    /// capture still holds them.
    pub fn capture(&self) -> Option<PointerCapture> {
        let mut state = self.state.borrow_mut();

        if state.captured {
            return None;
        }

        state.captured = true;
        state.listeners.push(ListenerKind::PointerMove);
        state.listeners.push(ListenerKind::PointerUp);

        debug!(listeners = state.listeners.len(), "pointer listeners registered");

        Some(PointerCapture {
            hub: self.state.clone(),
        })
    }
}

/// Registration of the global pointer listeners. Dropping it unregisters
/// both.
#[derive(Debug)]
pub struct PointerCapture {
    hub: Rc<RefCell<HubState>>,
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        let mut state = self.hub.borrow_mut();

        for kind in [ListenerKind::PointerMove, ListenerKind::PointerUp] {
            if let Some(index) = state.listeners.iter().position(|l| *l == kind) {
                state.listeners.remove(index);
            }
        }

        state.captured = false;

        debug!(listeners = state.listeners.len(), "pointer listeners released");
    }
}

struct ActiveGesture {
    gesture: ResizeGesture,
    _capture: PointerCapture,
}

pub struct ResizeController {
    hub: PointerHub,
    size: PanelSize,
    active: Option<ActiveGesture>,
}

impl ResizeController {
    pub fn new(hub: PointerHub, size: PanelSize) -> Self {
        Self {
            hub,
            size,
            active: None,
        }
    }

    pub fn size(&self) -> PanelSize {
        self.size
    }

    pub fn is_resizing(&self) -> bool {
        self.active.is_some()
    }

    pub fn gesture(&self) -> Option<&ResizeGesture> {
        self.active.as_ref().map(|active| &active.gesture)
    }

    /// Starts a gesture on the resize handle.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        // a lost pointer-up must not leave the old listeners behind
        self.release();

        let Some(capture) = self.hub.capture() else {
            debug!("pointer already captured elsewhere, ignoring resize start");
            return;
        };

        let gesture = ResizeGesture {
            anchor_x: x,
            anchor_y: y,
            base_width: self.size.width,
            base_height: self.size.height,
        };

        debug!(?gesture, "resize started");

        self.active = Some(ActiveGesture {
            gesture,
            _capture: capture,
        });
    }

    /// Follows the pointer. Returns the new size, or `None` when no gesture
    /// is active.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<PanelSize> {
        let active = self.active.as_ref()?;

        self.size = active.gesture.size_at(x, y);

        Some(self.size)
    }

    pub fn pointer_up(&mut self) {
        if self.release() {
            debug!(size = ?self.size, "resize finished");
        }
    }

    /// The hosting view is going away; behaves like a pointer-up.
    pub fn teardown(&mut self) {
        self.release();
    }

    fn release(&mut self) -> bool {
        self.active.take().is_some()
    }
}

impl Drop for ResizeController {
    fn drop(&mut self) {
        self.teardown();
    }
}
