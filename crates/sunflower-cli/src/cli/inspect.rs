//! Read-only views of a generated pattern: dot list, summary, auto-fit.

use anyhow::Result;
use serde::Serialize;

use sunflower::{Config, Dot, auto_fit_spacing, generate, max_radius, summary};

use super::common::{Invocation, print_pattern_options, write_output};

/// One dot in the JSON dump. Lengths in mm, bearing in radians.
#[derive(Debug, Serialize)]
struct DotRecord {
    x: f64,
    y: f64,
    radius: f64,
    bearing: f64,
    fill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke: Option<String>,
}

impl From<&Dot> for DotRecord {
    fn from(dot: &Dot) -> Self {
        Self {
            x: dot.position.x,
            y: dot.position.y,
            radius: dot.radius,
            bearing: dot.bearing,
            fill: dot.fill.to_string(),
            stroke: dot.stroke.map(|c| c.to_string()),
        }
    }
}

/// Parse the options of an inspect command, or `None` after printing help.
fn parse(args: &[String], usage: fn()) -> Result<Option<(Invocation, Config)>> {
    let inv = Invocation::parse(args)?;
    if inv.help {
        usage();
        return Ok(None);
    }
    let config = inv.config()?;
    Ok(Some((inv, config)))
}

/// Execute the dots command: dump the generated dots as JSON.
pub fn cmd_dots(args: &[String]) -> Result<()> {
    let Some((inv, config)) = parse(args, print_dots_usage)? else {
        return Ok(());
    };

    let records: Vec<DotRecord> = generate(&config).iter().map(DotRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;
    write_output(inv.output.as_deref().unwrap_or("-"), &(json + "\n"))
}

/// Execute the info command: print the one-line summary.
pub fn cmd_info(args: &[String]) -> Result<()> {
    let Some((_, config)) = parse(args, print_info_usage)? else {
        return Ok(());
    };
    println!("{}", summary(&config));
    Ok(())
}

/// Execute the autofit command: print the spacing that fills the canvas.
pub fn cmd_autofit(args: &[String]) -> Result<()> {
    let Some((_, config)) = parse(args, print_autofit_usage)? else {
        return Ok(());
    };

    let n = config.effective_dot_count();
    let spacing = auto_fit_spacing(n, config.canvas.width_mm, config.canvas.height_mm, config.edge_margin_mm);
    println!("{spacing}");
    eprintln!(
        "Radius: {:.1} mm on a {}x{} mm canvas ({} dots, {} mm margin)",
        max_radius(n, spacing),
        config.canvas.width_mm,
        config.canvas.height_mm,
        n,
        config.edge_margin_mm
    );
    Ok(())
}

fn print_dots_usage() {
    eprintln!("sunflower dots - Print the generated dots as JSON");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    sunflower dots [config.yaml|config.json] [OPTIONS] [-o file]");
    eprintln!();
    print_pattern_options();
}

fn print_info_usage() {
    eprintln!("sunflower info - Print a one-line pattern summary");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    sunflower info [config.yaml|config.json] [OPTIONS]");
    eprintln!();
    print_pattern_options();
}

fn print_autofit_usage() {
    eprintln!("sunflower autofit - Print the spacing that fills the canvas");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    sunflower autofit [config.yaml|config.json] [-n dots] [--width mm] [--height mm] [--margin mm]");
    eprintln!();
    print_pattern_options();
}
