//! Document Model - Template documents made of positioned blocks
//!
//! This crate provides the vocabulary shared by the editor and the renderer:
//! millimetre geometry, the closed set of block kinds, pages and page
//! settings, and the JSON document contract.

pub mod geometry;
mod node_id;
mod error;
pub mod style;
pub mod table;
mod block;
mod page;
mod document;

pub use geometry::*;
pub use node_id::*;
pub use error::*;
pub use style::*;
pub use table::*;
pub use block::*;
pub use page::*;
pub use document::*;
