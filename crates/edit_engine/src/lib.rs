//! Edit Engine - Canvas interactions, page management, and undo/redo
//!
//! This crate implements the editing surface over a [`doc_model::Document`]:
//! pointer-driven move and resize with commit-on-release, page-list
//! operations, block commands, text drafts, and snapshot history.

mod error;
pub mod resize;
mod canvas;
mod pages;
mod selection;
pub mod block_commands;
mod draft;
mod undo;
mod editor;

pub use error::*;
pub use resize::{finalize_move, finalize_resize, move_rect, resize_rect, HandleDirection};
pub use canvas::*;
pub use pages::*;
pub use selection::*;
pub use draft::*;
pub use undo::*;
pub use editor::*;
