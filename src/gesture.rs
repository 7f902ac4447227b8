//! Drag and pinch accumulation.
//!
//! Pointer input arrives as incremental deltas. Drag deltas move the logo,
//! pinch deltas grow or shrink it. The two streams are independent and may
//! interleave freely.

use crate::types::{PlacementState, SizeLimits};

/// Receiver for incremental pointer gestures.
pub trait GestureHandler {
    /// The pointer moved by `(dx, dy)` preview pixels during a drag.
    fn on_drag_delta(&mut self, dx: f64, dy: f64);

    /// A pinch changed the logo width by `d` preview pixels.
    fn on_pinch_delta(&mut self, d: f64);
}

/// Drag phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Pinch phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinchPhase {
    #[default]
    Idle,
    Resizing,
}

/// Accumulates gestures into a [`PlacementState`].
#[derive(Debug, Clone)]
pub struct GestureController {
    placement: PlacementState,
    limits: SizeLimits,
    drag: DragPhase,
    pinch: PinchPhase,
}

impl GestureController {
    /// Create a controller; the starting size is clamped into `limits`.
    ///
    /// Inverted limits (e.g. straight from a manifest) are swapped first.
    pub fn new(mut placement: PlacementState, limits: SizeLimits) -> Self {
        let limits = SizeLimits::new(limits.min, limits.max);
        placement.size = limits.clamp(placement.size);
        Self {
            placement,
            limits,
            drag: DragPhase::Idle,
            pinch: PinchPhase::Idle,
        }
    }

    pub fn placement(&self) -> &PlacementState {
        &self.placement
    }

    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag
    }

    pub fn pinch_phase(&self) -> PinchPhase {
        self.pinch
    }

    pub fn begin_drag(&mut self) {
        self.drag = DragPhase::Dragging;
    }

    pub fn end_drag(&mut self) {
        self.drag = DragPhase::Idle;
    }

    pub fn begin_pinch(&mut self) {
        self.pinch = PinchPhase::Resizing;
    }

    pub fn end_pinch(&mut self) {
        self.pinch = PinchPhase::Idle;
    }

    /// Keep position and size, adopt a new logo's proportions.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) {
        self.placement = self.placement.with_aspect_ratio(aspect_ratio);
    }
}

impl GestureHandler for GestureController {
    fn on_drag_delta(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.placement.position.x += dx;
        self.placement.position.y += dy;
    }

    fn on_pinch_delta(&mut self, d: f64) {
        self.placement.size = self.limits.clamp(self.placement.size + d);
    }
}
