//! Debug visualization of generated terrain.
//!
//! Renders the corner layer field and the dual-grid variants into
//! in-memory [`DebugImage`]s, or the variants into a plain-text map for
//! terminals and test failure messages.

mod image;
mod renderers;

pub use self::image::{DebugImage, Rgba};
pub use renderers::{
    layer_color, render_ascii, render_layer_field_debug, render_variant_debug, variant_glyph,
};
