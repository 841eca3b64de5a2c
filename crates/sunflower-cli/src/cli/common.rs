//! Option parsing shared by the commands that generate a pattern.
//!
//! Every generating command (`render`, `dots`, `info`, `autofit`,
//! `preset save`) accepts the same options. A config is built in layers:
//! defaults, then a config file or stored preset, then command-line
//! overrides in the order given, then `--auto-fit`.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info};

use sunflower::preset::DEFAULT_STORE;
use sunflower::{Config, ConfigRecord, ExportFormat, PresetStore, Rgb, default_file_name, snap_golden_angle};

/// Default raster scale (preview pixels per CSS pixel).
pub const DEFAULT_PNG_SCALE: f64 = 1.0;

/// Options that take a value and change the config.
const VALUE_OPTIONS: &[&str] = &[
    "-p", "--pattern", "-n", "--dots", "-s", "--spacing", "--power", "--packing",
    "--dot-size", "--dot-min", "--start-angle", "--golden-angle", "--b-offset",
    "--pinecone-scale", "--gradient", "--families", "--fib-pair", "--margin",
    "--fill-mode", "--hole-size", "--shape-size", "--color", "--color2",
    "--width", "--height", "--opacity",
];

/// Options without a value that change the config.
const SWITCH_OPTIONS: &[&str] = &[
    "--color-spirals", "--dual-colors", "--outline", "--no-grid",
    "--no-major-grid", "--no-axes", "--no-labels",
];

/// Parsed command line of a generating command.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Arguments that aren't options (config file, preset name).
    pub positional: Vec<String>,
    /// Config overrides as (option, value) pairs; switches have an empty value.
    pub overrides: Vec<(String, String)>,
    pub preset: Option<String>,
    pub store: Option<String>,
    pub auto_fit: bool,
    pub output: Option<String>,
    pub format: Option<ExportFormat>,
    pub png_scale: f64,
    pub help: bool,
}

impl Invocation {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut inv = Invocation {
            positional: Vec::new(),
            overrides: Vec::new(),
            preset: None,
            store: None,
            auto_fit: false,
            output: None,
            format: None,
            png_scale: DEFAULT_PNG_SCALE,
            help: false,
        };

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "-o" | "--output" => {
                    inv.output = Some(value(args, &mut i)?.to_string());
                }
                "-f" | "--format" => {
                    let name = value(args, &mut i)?;
                    inv.format = Some(
                        ExportFormat::from_name(name)
                            .ok_or_else(|| anyhow!("Unknown format: '{name}' (svg, dxf, png, jpg)"))?,
                    );
                }
                "--png-scale" => {
                    let scale: f64 = number(arg, value(args, &mut i)?)?;
                    if !(scale > 0.0) {
                        bail!("--png-scale must be positive, got {scale}");
                    }
                    inv.png_scale = scale;
                }
                "--preset" => inv.preset = Some(value(args, &mut i)?.to_string()),
                "--store" => inv.store = Some(value(args, &mut i)?.to_string()),
                "--auto-fit" => inv.auto_fit = true,
                "-h" | "--help" => inv.help = true,
                "-" => inv.positional.push(arg.to_string()),
                _ if VALUE_OPTIONS.contains(&arg) => {
                    let v = value(args, &mut i)?;
                    inv.overrides.push((arg.to_string(), v.to_string()));
                }
                _ if SWITCH_OPTIONS.contains(&arg) => {
                    inv.overrides.push((arg.to_string(), String::new()));
                }
                _ if arg.starts_with('-') => bail!("Unknown option: '{arg}'"),
                _ => inv.positional.push(arg.to_string()),
            }
            i += 1;
        }

        Ok(inv)
    }

    /// Open the preset store named by `--store`, or the default one.
    pub fn open_store(&self) -> Result<PresetStore> {
        let path = self.store.as_deref().unwrap_or(DEFAULT_STORE);
        PresetStore::open(path).with_context(|| format!("Failed to open preset store {path}"))
    }

    /// Build the config, taking the config file from the first positional.
    pub fn config(&self) -> Result<Config> {
        if self.positional.len() > 1 {
            bail!("Unexpected argument: '{}'", self.positional[1]);
        }
        self.config_from(self.positional.first().map(String::as_str))
    }

    /// Build the config with an explicit config file (or none).
    pub fn config_from(&self, path: Option<&str>) -> Result<Config> {
        let mut config = match (path, self.preset.as_deref()) {
            (Some(_), Some(_)) => bail!("Use either a config file or --preset, not both"),
            (Some(path), None) => load_config(path)?,
            (None, Some(name)) => {
                let store = self.open_store()?;
                let config = store
                    .get(name)
                    .with_context(|| format!("Failed to load preset from {}", store.path().display()))?;
                info!(preset = name, "loaded preset");
                config
            }
            (None, None) => Config::default(),
        };

        for (option, v) in &self.overrides {
            apply_option(&mut config, option, v)?;
        }

        if self.auto_fit {
            config = config.with_auto_fit();
            info!(spacing = config.spacing_mm, "auto-fit spacing");
        }

        Ok(config)
    }

    /// Output format and path for `render`.
    ///
    /// The format comes from `-f`, then the output extension, then SVG. With
    /// no `-o`, the file gets the default name for the pattern and canvas.
    pub fn output_target(&self, config: &Config) -> Result<(ExportFormat, String)> {
        let format = self
            .format
            .or_else(|| {
                self.output
                    .as_deref()
                    .and_then(|p| ExportFormat::from_path(Path::new(p)))
            })
            .unwrap_or(ExportFormat::Svg);

        let path = match &self.output {
            Some(path) => path.clone(),
            None => default_file_name(config.pattern, config.canvas, format),
        };

        if path == "-" && format.is_raster() {
            bail!("Cannot write {} to stdout", format.name());
        }

        Ok((format, path))
    }
}

/// Take the value following option `args[*i]`.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let option = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing value for {option}"))
}

fn number<T>(option: &str, v: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    v.trim()
        .parse()
        .with_context(|| format!("Invalid value for {option}: '{v}'"))
}

/// Apply one command-line override to `config`.
pub fn apply_option(config: &mut Config, option: &str, v: &str) -> Result<()> {
    match option {
        "-p" | "--pattern" => config.pattern = v.parse()?,
        "-n" | "--dots" => config.dot_count = number(option, v)?,
        "-s" | "--spacing" => config.spacing_mm = number(option, v)?,
        "--power" => config.radial_power = number(option, v)?,
        "--packing" => config.center_packing = number(option, v)?,
        "--dot-size" => config.dot_diameter_mm = number(option, v)?,
        "--dot-min" => config.min_dot_diameter_mm = number(option, v)?,
        "--start-angle" => config.start_angle_deg = number(option, v)?,
        "--golden-angle" => config.golden_angle_deg = snap_golden_angle(number(option, v)?),
        "--b-offset" => config.spiral_b_offset_deg = number(option, v)?,
        "--pinecone-scale" => config.pinecone_scale = number(option, v)?,
        "--gradient" => config.size_gradient = v.parse()?,
        "--families" => config.spiral_families = number(option, v)?,
        "--fib-pair" => {
            let (cw, ccw) = v
                .split_once(',')
                .ok_or_else(|| anyhow!("Invalid value for {option}: '{v}' (expected CW,CCW)"))?;
            config.fib_cw = number(option, cw)?;
            config.fib_ccw = number(option, ccw)?;
        }
        "--margin" => config.edge_margin_mm = number(option, v)?,
        "--fill-mode" => config.shape_fill_mode = v.parse()?,
        "--hole-size" => config.hole_size_mode = v.parse()?,
        "--shape-size" => config.shape_size_pct = number(option, v)?,
        "--color" => config.dot_color = Rgb::parse(v)?,
        "--color2" => config.dot_color2 = Rgb::parse(v)?,
        "--width" => config.canvas.width_mm = number(option, v)?,
        "--height" => config.canvas.height_mm = number(option, v)?,
        "--opacity" => config.dot_opacity = number(option, v)?,
        "--color-spirals" => config.color_spirals = true,
        "--dual-colors" => config.dual_family_colors = true,
        "--outline" => config.fill_dots = false,
        "--no-grid" => config.show_grid = false,
        "--no-major-grid" => config.show_major_grid = false,
        "--no-axes" => config.show_axes = false,
        "--no-labels" => config.show_labels = false,
        _ => bail!("Unknown option: '{option}'"),
    }
    debug!(option, value = v, "applied override");
    Ok(())
}

/// Load a config file. `.json` files are read as JSON, anything else as YAML.
///
/// Both use the same camelCase keys as stored presets.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let record: ConfigRecord = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config YAML {}", path.display()))?
    };

    let config = Config::from_record(record)
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    info!(path = %path.display(), pattern = %config.pattern, "loaded config");
    Ok(config)
}

/// Write text output to a file, or to stdout for `-`.
pub fn write_output(path: &str, content: &str) -> Result<()> {
    if path == "-" {
        print!("{content}");
    } else {
        fs::write(path, content).with_context(|| format!("Failed to write {path}"))?;
        eprintln!("Wrote: {path}");
    }
    Ok(())
}

/// Options shared by the generating commands, for usage text.
pub fn print_pattern_options() {
    eprintln!("PATTERN OPTIONS:");
    eprintln!("    -p, --pattern <name>     sunflower, pinecone, double-spiral, shape-circle,");
    eprintln!("                             shape-rectangle, shape-triangle (default: sunflower)");
    eprintln!("    -n, --dots <n>           Number of dots (default: 50)");
    eprintln!("    -s, --spacing <mm>       Radial spacing (default: 2.2)");
    eprintln!("    --auto-fit               Choose the spacing that fills the canvas");
    eprintln!("    --power <p>              Radial power (default: 0.5)");
    eprintln!("    --packing <k>            Center packing exponent (default: 0)");
    eprintln!("    --start-angle <deg>      Rotation of the first dot (default: 0)");
    eprintln!("    --golden-angle <deg>     Angular step, snaps to 137.508 when close");
    eprintln!("    --b-offset <deg>         Double spiral: offset of arm B (default: 180)");
    eprintln!("    --pinecone-scale <k>     Pinecone scale width (default: 0.7)");
    eprintln!("    --fib-pair <cw,ccw>      Double spiral family counts (default: 21,34)");
    eprintln!();
    eprintln!("DOT OPTIONS:");
    eprintln!("    --dot-size <mm>          Dot diameter (default: 1.0)");
    eprintln!("    --dot-min <mm>           Smallest dot diameter (default: 0.2)");
    eprintln!("    --gradient <mode>        none, inner-outer, outer-inner");
    eprintln!("    --color <color>          Dot color (default: #d4a017)");
    eprintln!("    --color2 <color>         Double spiral arm B color (default: #4363d8)");
    eprintln!("    --color-spirals          Color dots by spiral family");
    eprintln!("    --dual-colors            Fill by CW family, outline by CCW family");
    eprintln!("    --families <n>           Number of spiral families (default: 21)");
    eprintln!("    --outline                Outline dots instead of filling them");
    eprintln!("    --opacity <a>            Dot opacity 0..1 (default: 1)");
    eprintln!();
    eprintln!("SHAPE OPTIONS:");
    eprintln!("    --fill-mode <mode>       outline, filled (default: outline)");
    eprintln!("    --hole-size <mode>       uniform, fibonacci (default: fibonacci)");
    eprintln!("    --shape-size <pct>       Shape size, % of the canvas (default: 90)");
    eprintln!("    --margin <mm>            Edge margin (default: 2)");
    eprintln!();
    eprintln!("CANVAS OPTIONS:");
    eprintln!("    --width <mm>             Canvas width (default: 100)");
    eprintln!("    --height <mm>            Canvas height (default: 100)");
    eprintln!("    --no-grid                Raster: hide the 1 mm grid");
    eprintln!("    --no-major-grid          Raster: hide the 10 mm grid");
    eprintln!("    --no-axes                Raster: hide the center axes");
    eprintln!("    --no-labels              Don't store scale labels in presets");
    eprintln!();
    eprintln!("CONFIG SOURCES:");
    eprintln!("    <config.yaml|.json>      Start from a config file");
    eprintln!("    --preset <name>          Start from a stored preset");
    eprintln!("    --store <file>           Preset store (default: {DEFAULT_STORE})");
}
