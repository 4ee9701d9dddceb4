//! Miniplayer positioning engine
//!
//! Pointer-drag state machine for the floating player. Positions are always
//! clamped to the viewport, both while dragging and after a resize; the
//! element size depends on the current viewport breakpoint, so every clamp
//! recomputes it.

#![allow(dead_code)]

use egui::{Pos2, Vec2};

/// Gap kept from the right/left edges at initial placement.
pub const EDGE_MARGIN: f32 = 16.0;
/// Initial placement sits above the bottom navigation strip.
pub const BOTTOM_OFFSET: f32 = 100.0;

const NARROW_VIEWPORT: f32 = 768.0;
const NARROW_WIDTH: f32 = 256.0;
const WIDE_WIDTH: f32 = 320.0;

/// Current miniplayer size for a viewport: two fixed widths on either side
/// of the breakpoint, always 16:9.
pub fn player_size(viewport: Vec2) -> Vec2 {
    let width = if viewport.x < NARROW_VIEWPORT {
        NARROW_WIDTH
    } else {
        WIDE_WIDTH
    };
    Vec2::new(width, width * 9.0 / 16.0)
}

fn clamp_to_viewport(pos: Pos2, size: Vec2, viewport: Vec2) -> Pos2 {
    Pos2::new(
        pos.x.clamp(0.0, (viewport.x - size.x).max(0.0)),
        pos.y.clamp(0.0, (viewport.y - size.y).max(0.0)),
    )
}

pub struct MiniplayerPosition {
    pos: Pos2,
    // Cursor offset inside the element while a drag is in progress
    drag_offset: Option<Vec2>,
}

impl MiniplayerPosition {
    /// Default placement: bottom-right with fixed margins, clamped in case
    /// the viewport is smaller than the player.
    pub fn new(viewport: Vec2) -> Self {
        let size = player_size(viewport);
        let initial = Pos2::new(
            viewport.x - size.x - EDGE_MARGIN,
            viewport.y - size.y - BOTTOM_OFFSET,
        );
        Self {
            pos: clamp_to_viewport(initial, size, viewport),
            drag_offset: None,
        }
    }

    pub fn pos(&self) -> Pos2 {
        self.pos
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    /// Capture the pointer: remember where inside the element it grabbed.
    pub fn begin_drag(&mut self, pointer: Pos2) {
        self.drag_offset = Some(pointer - self.pos);
    }

    /// Move the element so the grab point stays under the cursor, clamped
    /// per axis to the viewport.
    pub fn update_drag(&mut self, pointer: Pos2, viewport: Vec2) {
        let Some(offset) = self.drag_offset else {
            return;
        };
        let size = player_size(viewport);
        self.pos = clamp_to_viewport(pointer - offset, size, viewport);
    }

    /// Release the pointer. No inertia.
    pub fn end_drag(&mut self) {
        self.drag_offset = None;
    }

    /// Re-clamp after a viewport change. Uses the new breakpoint's element
    /// size, so crossing the breakpoint never leaves the player outside.
    pub fn reclamp(&mut self, viewport: Vec2) {
        let size = player_size(viewport);
        self.pos = clamp_to_viewport(self.pos, size, viewport);
    }
}
