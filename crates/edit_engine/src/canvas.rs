//! Layout canvas - pointer-driven move and resize of blocks
//!
//! A pointer sequence (press, moves, release) accumulates transient geometry
//! in the canvas without touching the document. Release commits the final
//! geometry exactly once. Cancelling, or dropping the canvas mid-drag,
//! discards the transient state.
//!
//! Only one interaction exists at a time: the canvas is either idle,
//! resizing one block, or dragging one block.

use crate::resize::{finalize_move, finalize_resize, move_rect, resize_rect, HandleDirection};
use crate::{EditError, Result};
use doc_model::{px_to_mm, Block, BlockId, Document, RectMm};

/// Canvas configuration
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Display zoom; pointer pixels are divided by this before conversion to mm
    pub zoom: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

/// Pointer position in screen pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointPx {
    pub x: f64,
    pub y: f64,
}

impl PointPx {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A resize in progress
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub block_id: BlockId,
    pub handle: HandleDirection,
    /// Committed geometry when the drag started
    pub start: RectMm,
    pub pointer_origin: PointPx,
    /// Transient geometry
    pub current: RectMm,
}

/// A move in progress
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub block_id: BlockId,
    pub start: RectMm,
    pub pointer_origin: PointPx,
    pub current: RectMm,
}

/// Current canvas interaction
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    Resizing(ResizeSession),
    Dragging(DragSession),
}

/// What a release wrote to the document
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub block_id: BlockId,
    pub before: RectMm,
    pub after: RectMm,
}

/// Pointer interaction state for the editing surface
#[derive(Debug, Default)]
pub struct LayoutCanvas {
    config: CanvasConfig,
    interaction: Interaction,
}

impl LayoutCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            interaction: Interaction::Idle,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Change the zoom. Ignored while an interaction is running.
    pub fn set_zoom(&mut self, zoom: f64) {
        if self.is_busy() || !zoom.is_finite() || zoom <= 0.0 {
            return;
        }
        self.config.zoom = zoom;
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.interaction, Interaction::Idle)
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.interaction, Interaction::Resizing(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging(_))
    }

    /// Start resizing `block_id` from one of its handles
    pub fn begin_resize(
        &mut self,
        document: &Document,
        block_id: &BlockId,
        handle: HandleDirection,
        pointer: PointPx,
    ) -> Result<()> {
        let start = self.interaction_start(document, block_id)?;
        tracing::trace!(block = %block_id, ?handle, "resize started");
        self.interaction = Interaction::Resizing(ResizeSession {
            block_id: block_id.clone(),
            handle,
            start,
            pointer_origin: pointer,
            current: start,
        });
        Ok(())
    }

    /// Start moving `block_id`
    pub fn begin_drag(&mut self, document: &Document, block_id: &BlockId, pointer: PointPx) -> Result<()> {
        let start = self.interaction_start(document, block_id)?;
        tracing::trace!(block = %block_id, "drag started");
        self.interaction = Interaction::Dragging(DragSession {
            block_id: block_id.clone(),
            start,
            pointer_origin: pointer,
            current: start,
        });
        Ok(())
    }

    fn interaction_start(&self, document: &Document, block_id: &BlockId) -> Result<RectMm> {
        if self.is_busy() {
            return Err(EditError::InteractionInProgress);
        }
        let block = document
            .block(block_id)
            .ok_or_else(|| EditError::BlockNotFound(block_id.clone()))?;
        if block.locked {
            return Err(EditError::BlockLocked(block_id.clone()));
        }
        Ok(block.rect())
    }

    fn delta_mm(&self, origin: PointPx, pointer: PointPx) -> (f64, f64) {
        (
            px_to_mm((pointer.x - origin.x) / self.config.zoom),
            px_to_mm((pointer.y - origin.y) / self.config.zoom),
        )
    }

    /// Feed a pointer move. Returns the transient geometry, if any.
    pub fn pointer_move(&mut self, pointer: PointPx) -> Option<RectMm> {
        let rect = match &self.interaction {
            Interaction::Idle => return None,
            Interaction::Resizing(session) => {
                let (dx, dy) = self.delta_mm(session.pointer_origin, pointer);
                resize_rect(session.handle, session.start, dx, dy)
            }
            Interaction::Dragging(session) => {
                let (dx, dy) = self.delta_mm(session.pointer_origin, pointer);
                move_rect(session.start, dx, dy)
            }
        };

        match &mut self.interaction {
            Interaction::Resizing(session) => session.current = rect,
            Interaction::Dragging(session) => session.current = rect,
            Interaction::Idle => {}
        }
        tracing::trace!(x = rect.x, y = rect.y, w = rect.width, h = rect.height, "transient geometry");
        Some(rect)
    }

    /// Finish the interaction and commit its geometry.
    ///
    /// Returns `None` when idle, when the block vanished or was locked during
    /// the drag, or when the final geometry equals the starting one.
    pub fn release(&mut self, document: &mut Document) -> Option<Commit> {
        let interaction = std::mem::take(&mut self.interaction);
        let usable = document.page_settings.usable_area();
        let snap = document.page_settings.snap_step();

        let (block_id, start, after, handle) = match interaction {
            Interaction::Idle => return None,
            Interaction::Resizing(s) => {
                let after = finalize_resize(s.handle, s.current, usable, snap);
                (s.block_id, s.start, after, Some(s.handle))
            }
            Interaction::Dragging(s) => {
                let after = finalize_move(s.current, usable, snap);
                (s.block_id, s.start, after, None)
            }
        };

        let Some(block) = document.block_mut(&block_id) else {
            tracing::warn!(block = %block_id, "block removed during interaction, geometry discarded");
            return None;
        };
        if block.locked {
            tracing::debug!(block = %block_id, "block locked during interaction, geometry discarded");
            return None;
        }
        if after == start {
            return None;
        }

        apply_rect(block, after, handle);
        tracing::debug!(block = %block_id, ?handle, "geometry committed");
        Some(Commit {
            block_id,
            before: start,
            after,
        })
    }

    /// Abandon the interaction without touching the document
    pub fn cancel(&mut self) {
        if self.is_busy() {
            tracing::trace!("interaction cancelled");
        }
        self.interaction = Interaction::Idle;
    }

    /// Transient geometry of `block_id` if it is being edited
    pub fn preview_rect(&self, block_id: &BlockId) -> Option<RectMm> {
        match &self.interaction {
            Interaction::Resizing(s) if &s.block_id == block_id => Some(s.current),
            Interaction::Dragging(s) if &s.block_id == block_id => Some(s.current),
            _ => None,
        }
    }

    /// Geometry to draw for a block: transient if edited, committed otherwise
    pub fn displayed_rect(&self, block: &Block) -> RectMm {
        self.preview_rect(&block.id).unwrap_or_else(|| block.rect())
    }
}

/// Write committed geometry. A resize only writes its own axis so that
/// auto-height blocks keep `h_mm == None` after a horizontal resize.
fn apply_rect(block: &mut Block, rect: RectMm, handle: Option<HandleDirection>) {
    match handle {
        Some(HandleDirection::East) | Some(HandleDirection::West) => {
            block.x_mm = rect.x;
            block.w_mm = rect.width;
        }
        Some(HandleDirection::North) | Some(HandleDirection::South) => {
            block.y_mm = rect.y;
            block.h_mm = Some(rect.height);
        }
        None => {
            block.x_mm = rect.x;
            block.y_mm = rect.y;
        }
    }
    block.clamp_to_minimum();
}
