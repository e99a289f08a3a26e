//! Drag interaction for reorderable lists.
//!
//! # States
//!
//! `Idle -> Dragging -> Idle`. A pointer press on a drag handle only starts a
//! drag once the pointer has travelled the activation distance; a shorter
//! press is a click. Keyboard pick-up starts a drag immediately and the
//! arrow commands move the drop target one slot at a time.
//!
//! The controller never mutates a list itself. A finished gesture yields a
//! [`DropOutcome`] which the caller applies with [`apply_drop`].

use tracing::debug;

use crm_model::Definition;

use crate::reorder::OrderedList;

/// Default pointer travel before a press turns into a drag.
pub const DEFAULT_ACTIVATION_DISTANCE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// How the current drag was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragInput {
    Pointer,
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Index of the dragged entry when the drag began.
        from: usize,
        /// Entry currently under the dragged item, if any.
        over: Option<usize>,
        input: DragInput,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    PointerDown { index: usize, position: Point },
    PointerMove { position: Point, over: Option<usize> },
    PointerUp,
    /// Escape or a lost pointer capture.
    Cancel,
    KeyboardPickUp { index: usize },
    KeyboardMove(KeyDirection),
    KeyboardDrop,
}

/// Result of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Moved { from: usize, to: usize },
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingPress {
    index: usize,
    origin: Point,
}

/// Turns pointer and keyboard events into reorder requests.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    pending: Option<PendingPress>,
    activation_distance: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DISTANCE)
    }
}

impl DragController {
    pub fn new(activation_distance: f32) -> Self {
        Self {
            state: DragState::Idle,
            pending: None,
            activation_distance: activation_distance.max(0.0),
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragged_index(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { from, .. } => Some(from),
            DragState::Idle => None,
        }
    }

    pub fn hovered_index(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { over, .. } => over,
            DragState::Idle => None,
        }
    }

    /// Feed one event for a list of `len` entries.
    ///
    /// Returns `Some` when a gesture finishes (drop, cancel, or click).
    pub fn handle(&mut self, event: DragEvent, len: usize) -> Option<DropOutcome> {
        match event {
            DragEvent::PointerDown { index, position } => {
                if self.state == DragState::Idle && index < len {
                    self.pending = Some(PendingPress {
                        index,
                        origin: position,
                    });
                }
                None
            }
            DragEvent::PointerMove { position, over } => {
                self.pointer_moved(position, over);
                None
            }
            DragEvent::PointerUp => {
                if self.pending.take().is_some() {
                    debug!("press released below activation distance");
                    return Some(DropOutcome::Unchanged);
                }
                self.finish(DragInput::Pointer, len)
            }
            DragEvent::Cancel => {
                let had_gesture = self.pending.take().is_some() || self.is_dragging();
                self.state = DragState::Idle;
                if had_gesture {
                    debug!("drag cancelled");
                    Some(DropOutcome::Unchanged)
                } else {
                    None
                }
            }
            DragEvent::KeyboardPickUp { index } => {
                if self.state == DragState::Idle && index < len {
                    self.pending = None;
                    self.state = DragState::Dragging {
                        from: index,
                        over: Some(index),
                        input: DragInput::Keyboard,
                    };
                    debug!(index, "keyboard drag started");
                }
                None
            }
            DragEvent::KeyboardMove(direction) => {
                if let DragState::Dragging {
                    from,
                    over,
                    input: DragInput::Keyboard,
                } = self.state
                {
                    let current = over.unwrap_or(from);
                    let next = match direction {
                        KeyDirection::Up => current.saturating_sub(1),
                        KeyDirection::Down => (current + 1).min(len.saturating_sub(1)),
                    };
                    self.state = DragState::Dragging {
                        from,
                        over: Some(next),
                        input: DragInput::Keyboard,
                    };
                }
                None
            }
            DragEvent::KeyboardDrop => self.finish(DragInput::Keyboard, len),
        }
    }

    fn pointer_moved(&mut self, position: Point, over: Option<usize>) {
        if let Some(press) = self.pending {
            if press.origin.distance(position) < self.activation_distance {
                return;
            }
            self.pending = None;
            self.state = DragState::Dragging {
                from: press.index,
                over,
                input: DragInput::Pointer,
            };
            debug!(index = press.index, "pointer drag started");
            return;
        }
        if let DragState::Dragging {
            from,
            input: DragInput::Pointer,
            ..
        } = self.state
        {
            self.state = DragState::Dragging {
                from,
                over,
                input: DragInput::Pointer,
            };
        }
    }

    fn finish(&mut self, expected: DragInput, len: usize) -> Option<DropOutcome> {
        let DragState::Dragging { from, over, input } = self.state else {
            return None;
        };
        if input != expected {
            return None;
        }
        self.state = DragState::Idle;
        let outcome = match over {
            Some(to) if to < len && from < len && to != from => DropOutcome::Moved { from, to },
            _ => DropOutcome::Unchanged,
        };
        debug!(?outcome, "drag finished");
        Some(outcome)
    }
}

/// Apply a finished gesture to `list`. Returns true if the list changed.
pub fn apply_drop<D: Definition>(list: &mut OrderedList<D>, outcome: DropOutcome) -> bool {
    match outcome {
        DropOutcome::Moved { from, to } => list.move_to(from, to),
        DropOutcome::Unchanged => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(controller: &mut DragController, index: usize) {
        controller.handle(
            DragEvent::PointerDown {
                index,
                position: Point::new(0.0, 0.0),
            },
            4,
        );
    }

    #[test]
    fn short_press_is_a_click() {
        let mut controller = DragController::default();
        press(&mut controller, 3);
        controller.handle(
            DragEvent::PointerMove {
                position: Point::new(1.0, 1.0),
                over: Some(1),
            },
            4,
        );
        assert!(!controller.is_dragging());
        assert_eq!(
            controller.handle(DragEvent::PointerUp, 4),
            Some(DropOutcome::Unchanged)
        );
    }

    #[test]
    fn pointer_drag_drops_on_target() {
        let mut controller = DragController::default();
        press(&mut controller, 3);
        controller.handle(
            DragEvent::PointerMove {
                position: Point::new(0.0, -40.0),
                over: Some(2),
            },
            4,
        );
        assert_eq!(controller.dragged_index(), Some(3));
        controller.handle(
            DragEvent::PointerMove {
                position: Point::new(0.0, -80.0),
                over: Some(1),
            },
            4,
        );
        assert_eq!(controller.hovered_index(), Some(1));
        assert_eq!(
            controller.handle(DragEvent::PointerUp, 4),
            Some(DropOutcome::Moved { from: 3, to: 1 })
        );
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn drop_outside_targets_changes_nothing() {
        let mut controller = DragController::default();
        press(&mut controller, 0);
        controller.handle(
            DragEvent::PointerMove {
                position: Point::new(300.0, 0.0),
                over: None,
            },
            4,
        );
        assert_eq!(
            controller.handle(DragEvent::PointerUp, 4),
            Some(DropOutcome::Unchanged)
        );
    }

    #[test]
    fn escape_cancels() {
        let mut controller = DragController::default();
        press(&mut controller, 1);
        controller.handle(
            DragEvent::PointerMove {
                position: Point::new(0.0, 20.0),
                over: Some(2),
            },
            4,
        );
        assert_eq!(
            controller.handle(DragEvent::Cancel, 4),
            Some(DropOutcome::Unchanged)
        );
        assert_eq!(controller.handle(DragEvent::PointerUp, 4), None);
        assert_eq!(controller.handle(DragEvent::Cancel, 4), None);
    }

    #[test]
    fn keyboard_reorder_is_bounded() {
        let mut controller = DragController::default();
        controller.handle(DragEvent::KeyboardPickUp { index: 2 }, 4);
        for _ in 0..5 {
            controller.handle(DragEvent::KeyboardMove(KeyDirection::Down), 4);
        }
        assert_eq!(controller.hovered_index(), Some(3));
        for _ in 0..5 {
            controller.handle(DragEvent::KeyboardMove(KeyDirection::Up), 4);
        }
        assert_eq!(
            controller.handle(DragEvent::KeyboardDrop, 4),
            Some(DropOutcome::Moved { from: 2, to: 0 })
        );
    }

    #[test]
    fn keyboard_drop_in_place_is_unchanged() {
        let mut controller = DragController::default();
        controller.handle(DragEvent::KeyboardPickUp { index: 1 }, 4);
        assert_eq!(
            controller.handle(DragEvent::KeyboardDrop, 4),
            Some(DropOutcome::Unchanged)
        );
    }

    #[test]
    fn press_out_of_range_is_ignored() {
        let mut controller = DragController::default();
        controller.handle(DragEvent::KeyboardPickUp { index: 9 }, 4);
        assert!(!controller.is_dragging());
        assert_eq!(controller.handle(DragEvent::KeyboardDrop, 4), None);
    }
}
