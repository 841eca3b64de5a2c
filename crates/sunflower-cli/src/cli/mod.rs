//! CLI command implementations.
//!
//! - `render` - Generate a pattern and write SVG, DXF, PNG or JPEG
//! - `dots` / `info` / `autofit` - Inspect a pattern without writing files
//! - `preset` - Manage the named config store
//!
//! `common` holds the option parser every generating command shares and
//! `preview` the raster renderer behind PNG/JPEG output.

pub mod common;
pub mod inspect;
pub mod preset;
pub mod preview;
pub mod render;

pub use inspect::{cmd_autofit, cmd_dots, cmd_info};
pub use preset::cmd_preset;
pub use render::{cmd_render, print_example};
