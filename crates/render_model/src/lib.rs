//! Render Model - Document to render conversion
//!
//! This crate plays a document back as a render model, either as an empty
//! template or as a data-filled, signed instance, and writes that model to
//! an HTML print surface.

mod render_item;
mod renderer;
mod error;
mod fields;
mod signature;
pub mod sanitize;
pub mod html;

pub use render_item::*;
pub use renderer::*;
pub use error::*;
pub use fields::{format_date_time, format_number};
pub use signature::*;
pub use sanitize::sanitize_html;
pub use html::to_html;
