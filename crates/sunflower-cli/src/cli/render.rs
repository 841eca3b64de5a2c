//! Generate a pattern and write it as SVG, DXF, PNG or JPEG.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use sunflower::{ExportFormat, Sheet, to_dxf, to_svg};

use super::common::{Invocation, print_pattern_options, write_output};
use super::preview;

/// Execute the render command.
pub fn cmd_render(args: &[String]) -> Result<()> {
    let inv = Invocation::parse(args)?;
    if inv.help {
        print_usage();
        return Ok(());
    }

    let config = inv.config()?;
    let (format, path) = inv.output_target(&config)?;
    let sheet = Sheet::from_config(&config);

    info!(
        pattern = %config.pattern,
        dots = sheet.dots.len(),
        format = format.name(),
        "generated pattern"
    );

    match format {
        ExportFormat::Svg => write_output(&path, &to_svg(&sheet))?,
        ExportFormat::Dxf => write_output(&path, &to_dxf(&sheet))?,
        ExportFormat::Png | ExportFormat::Jpeg => {
            let image = preview::render_preview(&config, &sheet, inv.png_scale)?;
            let (width, height) = image.dimensions();
            preview::save_preview(image, Path::new(&path), format)?;
            eprintln!("Wrote: {path} ({width}x{height})");
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("sunflower render - Generate a dot pattern and export it");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    sunflower render [config.yaml|config.json] [OPTIONS]");
    eprintln!();
    eprintln!("OUTPUT OPTIONS:");
    eprintln!("    -o, --output <file>      Output file, - for stdout (SVG/DXF only)");
    eprintln!("                             (default: <pattern>_circle_<d>mm.svg)");
    eprintln!("    -f, --format <fmt>       svg, dxf, png, jpg (default: from extension, else svg)");
    eprintln!("    --png-scale <n>          Raster scale factor (default: 1.0)");
    eprintln!();
    print_pattern_options();
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    sunflower render -n 610 --auto-fit -o big.svg");
    eprintln!("    sunflower render -p pinecone -n 233 -f dxf");
    eprintln!("    sunflower render design.yaml -o preview.png --png-scale 2");
}

/// Print an example config file.
pub fn print_example() {
    println!(
        r##"# Example sunflower config (YAML; JSON files use the same keys)
patternType: sunflower   # sunflower, pinecone, double-spiral,
                         # shape-circle, shape-rectangle, shape-triangle
canvasWidth: 100         # millimeters
canvasHeight: 100

numDots: 377
spacing: 2.2             # mm; use --auto-fit to fill the canvas
radialPower: 0.5
centerPacking: 0
startAngle: 0
goldenAngle: 137.50776405003785

dotSize: 1.2             # diameter, mm
dotSizeMin: 0.3
sizeGradient: inner-outer  # none, inner-outer, outer-inner
dotColor: "#d4a017"
dotOpacity: 1.0
fillDots: true

colorSpirals: true
spiralFamilies: 21

# double-spiral
dotColor2: "#4363d8"
spiralBOffset: 180
fibCW: 21
fibCCW: 34

# pinecone
pineconeScale: 0.7

# shapes
shapeFillMode: filled    # outline, filled
holeSizeMode: fibonacci  # uniform, fibonacci
shapeSize: 90            # percent of the canvas
edgeMargin: 2

# raster preview
showGrid: true
showMajorGrid: true
showAxes: true
"##
    );
}
