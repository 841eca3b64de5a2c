//! # sunflower
//!
//! Dot pattern generation: phyllotaxis spirals (sunflower, pinecone, double
//! spiral) and dots on or inside basic shapes, with SVG and DXF export.
//!
//! ```
//! use sunflower::{generate, Config, PatternType};
//!
//! let config = Config { pattern: PatternType::Pinecone, dot_count: 89, ..Config::default() };
//! let dots = generate(&config);
//! assert_eq!(dots.len(), 89);
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod patterns;
pub mod preset;
pub mod rng;

// Re-export common types at crate root for convenience.
pub use color::Rgb;
pub use config::{
    snap_golden_angle, Config, ConfigRecord, HoleSizeMode, PatternType, ShapeFillMode,
    SizeGradient, GOLDEN_ANGLE_DEG,
};
pub use error::{Error, Result};
pub use export::{default_file_name, to_dxf, to_svg, ExportFormat};
pub use geometry::{Canvas, Dot, Marker, Point, PX_PER_MM};
pub use layout::{auto_fit_exact, auto_fit_spacing, fib_decompose, fibonacci_radii, max_radius};
pub use patterns::{generate, split_arms, summary, Sheet, Style, Variant};
pub use preset::PresetStore;
pub use rng::Rng;
