//! Pointer interaction: drag-to-move as an explicit state machine
//!
//! ```text
//!   Idle --pointer_down--> Dragging --pointer_up--> Idle
//!                            |  ^
//!                            +--+ pointer_move (live writes, no history)
//! ```
//!
//! All pointer input arrives in screen coordinates and is mapped through the
//! viewport's inverse scale before it touches the document.

use crate::{ElementStore, Result};
use template_model::{clamp_to_page, ElementId, ElementKind, Point, Viewport, Zoom};

/// Active canvas tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Click selects, drag moves
    #[default]
    Select,
    /// Next click on the canvas places an element of this kind
    Insert(ElementKind),
}

/// Drag state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        element_id: ElementId,
        /// Pointer position relative to the element origin at grab time
        offset: Point,
        /// Element origin when the drag began
        start: Point,
    },
}

/// Result of releasing the pointer
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// The element ended somewhere other than where it started
    Moved {
        element_id: ElementId,
        from: Point,
        to: Point,
    },
    /// The element was released at its starting position
    Unchanged,
    /// No drag was in progress
    NotDragging,
}

/// Translates pointer events into element moves
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: DragState,
    viewport: Viewport,
    tool: Tool,
}

impl InteractionController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: DragState::Idle,
            viewport,
            tool: Tool::Select,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Move the canvas origin (e.g. after scrolling)
    pub fn set_origin(&mut self, origin: Point) {
        self.viewport.origin = origin;
    }

    pub fn zoom(&self) -> Zoom {
        self.viewport.zoom
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.viewport.zoom = zoom;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Screen point to document point
    pub fn to_document(&self, screen: Point) -> Point {
        self.viewport.to_document(screen)
    }

    /// Grab `id` at the given screen position and select it.
    ///
    /// A drag already in progress is ended first; its outcome is returned so
    /// the caller can record it.
    pub fn begin_drag(
        &mut self,
        store: &mut ElementStore,
        id: &ElementId,
        screen: Point,
    ) -> Result<DragOutcome> {
        let pointer = self.to_document(screen);
        let origin = store
            .get(id)
            .map(|e| e.origin())
            .ok_or_else(|| crate::EditError::ElementNotFound(id.to_string()))?;

        let previous = self.end_drag(store);
        store.select(id)?;

        self.state = DragState::Dragging {
            element_id: id.clone(),
            offset: pointer.offset_from(origin),
            start: origin,
        };
        Ok(previous)
    }

    /// Follow the pointer. Writes straight into the store and returns the
    /// clamped origin, or `None` when idle.
    pub fn drag_to(&mut self, store: &mut ElementStore, screen: Point) -> Result<Option<Point>> {
        let DragState::Dragging {
            ref element_id,
            offset,
            ..
        } = self.state
        else {
            return Ok(None);
        };

        let Some(element) = store.get(element_id) else {
            // Element vanished mid-drag (undo, delete); abandon the gesture.
            self.state = DragState::Idle;
            return Ok(None);
        };
        let size = element.size();

        let pointer = self.to_document(screen);
        let target = clamp_to_page(pointer.offset_from(offset), size);
        store.set_position(element_id, target)?;
        Ok(Some(target))
    }

    /// Abandon any drag in progress, leaving the element where it is
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Release the pointer and report whether the element actually moved
    pub fn end_drag(&mut self, store: &ElementStore) -> DragOutcome {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging {
            element_id, start, ..
        } = state
        else {
            return DragOutcome::NotDragging;
        };

        match store.get(&element_id) {
            Some(element) if element.origin() != start => DragOutcome::Moved {
                to: element.origin(),
                from: start,
                element_id,
            },
            _ => DragOutcome::Unchanged,
        }
    }
}
