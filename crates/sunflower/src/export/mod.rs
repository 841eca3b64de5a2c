//! File outputs for a generated [`Sheet`](crate::Sheet).
//!
//! Vector (SVG) and CAD (DXF) exports use a circular boundary: the
//! document is the circle inscribed in the canvas, and dots outside it are
//! clipped (SVG) or simply lie outside the border circle (DXF). Raster
//! previews keep the full rectangular canvas and are produced by the CLI.

pub mod dxf;
pub mod svg;

pub use dxf::to_dxf;
pub use svg::to_svg;

use std::path::Path;

use crate::config::PatternType;
use crate::geometry::Canvas;

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Dxf,
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Dxf => "dxf",
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            other => other.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<ExportFormat> {
        match name.to_lowercase().as_str() {
            "svg" => Some(ExportFormat::Svg),
            "dxf" => Some(ExportFormat::Dxf),
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }

    pub fn is_raster(&self) -> bool {
        matches!(self, ExportFormat::Png | ExportFormat::Jpeg)
    }
}

/// Default output file name for a pattern and canvas.
///
/// Rasters are named after the full canvas, vector and CAD files after the
/// diameter of their circular boundary.
///
/// ```
/// use sunflower::export::{default_file_name, ExportFormat};
/// use sunflower::{Canvas, PatternType};
///
/// let canvas = Canvas::new(120.0, 80.0);
/// assert_eq!(
///     default_file_name(PatternType::Sunflower, canvas, ExportFormat::Png),
///     "sunflower_120x80mm.png"
/// );
/// assert_eq!(
///     default_file_name(PatternType::Pinecone, canvas, ExportFormat::Dxf),
///     "pinecone_circle_80mm.dxf"
/// );
/// ```
pub fn default_file_name(pattern: PatternType, canvas: Canvas, format: ExportFormat) -> String {
    if format.is_raster() {
        format!(
            "{}_{}x{}mm.{}",
            pattern.name(),
            canvas.width_mm,
            canvas.height_mm,
            format.extension()
        )
    } else {
        let diameter = (canvas.inscribed_radius() * 2.0).round();
        format!(
            "{}_circle_{}mm.{}",
            pattern.name(),
            diameter,
            format.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_paths() {
        assert_eq!(ExportFormat::from_path(Path::new("a/b.SVG")), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::from_path(Path::new("x.jpeg")), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_path(Path::new("noext")), None);
        assert_eq!(ExportFormat::from_path(Path::new("x.gif")), None);
    }

    #[test]
    fn default_names() {
        let canvas = Canvas::new(100.5, 150.0);
        assert_eq!(
            default_file_name(PatternType::DoubleSpiral, canvas, ExportFormat::Jpeg),
            "double-spiral_100.5x150mm.jpg"
        );
        assert_eq!(
            default_file_name(PatternType::ShapeCircle, canvas, ExportFormat::Svg),
            "shape-circle_circle_101mm.svg"
        );
    }
}
